//! Token extraction for XML-like text
//!
//! This module turns a raw text buffer into the fragment stream the formatter
//! walks. It is deliberately not an XML parser: fragments are cut purely on
//! textual boundaries (every `<`, plus namespace declarations), and each
//! fragment keeps its original content including the leading tag syntax.
//!
//! # Example
//!
//! ```rust
//! use xmlfmt::tokenizer::{normalize, tokenize};
//!
//! let normalized = normalize("<root>  <child>text</child></root>");
//! let tokens = tokenize(&normalized);
//! assert_eq!(tokens, ["", "<root>", "<child>text", "</child>", "</root>"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Whitespace runs strictly between a `>` and the next `<`
static BETWEEN_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").expect("valid pattern"));

/// Collapse whitespace between adjacent tags
///
/// Any run of whitespace that sits strictly between a `>` and the following
/// `<` is removed, so previously formatted input and compact input tokenize
/// identically. Whitespace inside text content (anything not bracketed by
/// `>`...`<`) is left alone.
///
/// # Example
///
/// ```rust
/// use xmlfmt::tokenizer::normalize;
///
/// assert_eq!(normalize("<a>\n  <b>x</b>\n</a>"), "<a><b>x</b></a>");
/// assert_eq!(normalize("<a>some text</a>"), "<a>some text</a>");
/// ```
pub fn normalize(text: &str) -> Cow<'_, str> {
    BETWEEN_TAGS.replace_all(text, "><")
}

/// Split normalized text into the formatter's fragment stream
///
/// A new fragment opens before every `<` and before every `xmlns:` or
/// `xmlns=` occurrence; whitespace immediately preceding a namespace
/// declaration is dropped from the fragment it would otherwise end. The
/// first fragment is whatever precedes the first `<` and is often empty.
///
/// This is a single left-to-right scan. The original technique of splicing a
/// sentinel string into the text and splitting on it produces the same
/// boundaries but misbehaves when the input already contains the sentinel;
/// the scan has no such collision case.
///
/// # Example
///
/// ```rust
/// use xmlfmt::tokenizer::tokenize;
///
/// let tokens = tokenize(r#"<root xmlns:x="u"><x:a>v</x:a></root>"#);
/// assert_eq!(
///     tokens,
///     ["", "<root", r#"xmlns:x="u">"#, "<x:a>v", "</x:a>", "</root>"],
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' {
            tokens.push(&text[start..i]);
            start = i;
            i += 1;
        } else if bytes[i] == b'x'
            && (bytes[i..].starts_with(b"xmlns:") || bytes[i..].starts_with(b"xmlns="))
        {
            let mut cut = i;
            while cut > start && bytes[cut - 1].is_ascii_whitespace() {
                cut -= 1;
            }
            tokens.push(&text[start..cut]);
            start = i;
            i += b"xmlns:".len();
        } else {
            // Boundary markers are ASCII, so byte-wise stepping is safe:
            // continuation bytes of multi-byte chars never equal b'<' or b'x'.
            i += 1;
        }
    }
    tokens.push(&text[start..]);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_inter_tag_whitespace_only() {
        assert_eq!(normalize("<a> \n\t <b/>"), "<a><b/>");
        assert_eq!(normalize("<a>keep  this</a>"), "<a>keep  this</a>");
    }

    #[test]
    fn splits_before_every_angle_bracket() {
        assert_eq!(
            tokenize("<a><b>t</b></a>"),
            ["", "<a>", "<b>t", "</b>", "</a>"]
        );
    }

    #[test]
    fn leading_text_becomes_first_fragment() {
        assert_eq!(tokenize("\n<a></a>"), ["\n", "<a>", "</a>"]);
    }

    #[test]
    fn namespace_boundary_eats_preceding_whitespace() {
        assert_eq!(
            tokenize("<root \n  xmlns=\"u\">"),
            ["", "<root", "xmlns=\"u\">"]
        );
    }

    #[test]
    fn multiple_namespace_declarations() {
        assert_eq!(
            tokenize("<r xmlns:a=\"1\" xmlns:b=\"2\">"),
            ["", "<r", "xmlns:a=\"1\"", "xmlns:b=\"2\">"]
        );
    }

    #[test]
    fn non_ascii_text_content() {
        assert_eq!(
            tokenize("<a>héllo→</a>"),
            ["", "<a>héllo→", "</a>"]
        );
    }
}
