use crate::formatter::classify;
use crate::tokenizer::{normalize, tokenize};

fn debug_tokens(source: &str) {
    let normalized = normalize(source);
    let tokens = tokenize(&normalized);
    for (ix, token) in tokens.iter().enumerate() {
        let prev = if ix > 0 { Some(tokens[ix - 1]) } else { None };
        let kind = classify(token, prev);
        let display = if token.contains('\n') {
            format!("{:?}", token)
        } else {
            token.to_string()
        };
        println!("{:3} {:?}: {}", ix, kind, display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_mixed_document() {
        let source = r#"<?xml version="1.0"?>
<!-- config -->
<root xmlns:x="http://example.com">
  <x:child>value</x:child>
  <empty />
  <![CDATA[some <xml> content]]>
</root>"#;

        debug_tokens(source);
    }
}
