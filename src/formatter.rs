//! Core formatting engine for XML text
//!
//! This module contains the main formatting logic that re-indents an XML
//! document into canonical form. Tokens produced by the [`crate::tokenizer`]
//! are classified into a closed set of kinds and emitted one per line at the
//! current nesting depth, except for constructs that stay inline (text
//! content, an element closed on the line it was opened, the interior of
//! comments and CDATA sections).
//!
//! # Example
//!
//! ```rust
//! use xmlfmt::formatter::{IndentSpec, format_xml};
//!
//! let compact = "<root><child>value</child></root>";
//! let pretty = format_xml(compact, &IndentSpec::Spaces(2));
//! assert_eq!(pretty, "<root>\n  <child>value</child>\n</root>");
//! ```

use crate::tokenizer::{normalize, tokenize};
use once_cell::sync::Lazy;
use regex::Regex;
use std::convert::Infallible;
use std::str::FromStr;

/// Output mode for the CLI
///
/// Determines what happens to a file whose formatted content differs from
/// what is on disk.
#[derive(Clone, Copy, Debug)]
pub enum Mode {
    /// Print a unified diff of the required changes to stdout
    Diff,
    /// Rewrite the file in place with the formatted content
    Fix,
}

/// One level of indentation
///
/// Either a count of space characters or an arbitrary literal string (for
/// example a single tab) repeated once per nesting depth.
///
/// Parsing from a string never fails: anything that parses as a non-negative
/// integer becomes [`IndentSpec::Spaces`], everything else is taken verbatim
/// as [`IndentSpec::Literal`].
///
/// # Example
///
/// ```rust
/// use xmlfmt::formatter::IndentSpec;
///
/// assert_eq!("4".parse::<IndentSpec>().unwrap(), IndentSpec::Spaces(4));
/// assert_eq!(
///     "\t".parse::<IndentSpec>().unwrap(),
///     IndentSpec::Literal("\t".to_owned()),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndentSpec {
    /// This many space characters per level
    Spaces(usize),
    /// This exact string per level
    Literal(String),
}

impl IndentSpec {
    fn unit(&self) -> String {
        match self {
            IndentSpec::Spaces(n) => " ".repeat(*n),
            IndentSpec::Literal(s) => s.clone(),
        }
    }
}

impl Default for IndentSpec {
    fn default() -> Self {
        IndentSpec::Spaces(4)
    }
}

impl FromStr for IndentSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<usize>()
            .map(IndentSpec::Spaces)
            .unwrap_or_else(|_| IndentSpec::Literal(s.to_owned())))
    }
}

/// Configuration options for processing files
///
/// # Example
///
/// ```rust
/// use xmlfmt::formatter::{FormatOptions, IndentSpec, Mode};
///
/// let opts = FormatOptions {
///     indent: IndentSpec::Spaces(2),
///     mode: Mode::Fix, // Write changes back to files
/// };
/// # let _ = opts;
/// ```
#[derive(Clone, Debug)]
pub struct FormatOptions {
    /// Indentation unit applied once per nesting level
    pub indent: IndentSpec,
    /// How to handle files that need reformatting
    pub mode: Mode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: IndentSpec::default(),
            mode: Mode::Diff,
        }
    }
}

/// `<` followed by a tag-name character, anywhere in the token
static TAG_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<\w").expect("valid pattern"));
/// Opening tag name at the start of a token
static OPEN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<(\w[\w:.,-]*)").expect("valid pattern"));
/// Closing tag name at the start of a token
static CLOSE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^</(\w[\w:.,-]*)").expect("valid pattern"));

/// How a single token is emitted and how it moves the nesting depth
///
/// The variants are tested in declaration order; earlier checks win. The
/// declaration cases must run first because `<!-- -->` and `<![CDATA[ ]]>`
/// tokens would otherwise match the ordinary tag patterns below them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `<!...` — opens a comment, CDATA section, or DOCTYPE declaration
    DeclarationStart,
    /// `-->` or `]>` — continuation that closes a declaration region
    DeclarationEnd,
    /// `</name>` directly after its own `<name...>` token, kept inline
    MatchedPair,
    /// `<name...>` with no close on the same token
    OpenTag,
    /// `<name>text</name>` arriving as one token
    OpenCloseTag,
    /// `</name>` closing an earlier line's element
    CloseTag,
    /// `<name ... />`
    SelfClosing,
    /// `<?...?>`
    ProcessingInstruction,
    /// `xmlns:` / `xmlns=` continuation split out of its owning tag
    NamespaceFragment,
    /// Anything else, reproduced verbatim
    Text,
}

/// True when the previous token opened `<name...>` and this one is the
/// matching `</name>` for the same name.
fn is_matched_pair(prev: &str, token: &str) -> bool {
    match (OPEN_NAME.captures(prev), CLOSE_NAME.captures(token)) {
        (Some(open), Some(close)) => open[1] == close[1],
        _ => false,
    }
}

pub(crate) fn classify(token: &str, prev: Option<&str>) -> TokenKind {
    if token.contains("<!") {
        return TokenKind::DeclarationStart;
    }
    if token.contains("-->") || token.contains("]>") {
        return TokenKind::DeclarationEnd;
    }
    if prev.is_some_and(|p| is_matched_pair(p, token)) {
        return TokenKind::MatchedPair;
    }
    let opens = TAG_OPEN.is_match(token);
    let closes = token.contains("</");
    let self_closes = token.contains("/>");
    if opens && !closes && !self_closes {
        return TokenKind::OpenTag;
    }
    if opens && closes {
        return TokenKind::OpenCloseTag;
    }
    if closes {
        return TokenKind::CloseTag;
    }
    if self_closes {
        return TokenKind::SelfClosing;
    }
    if token.contains("<?") {
        return TokenKind::ProcessingInstruction;
    }
    if token.contains("xmlns:") || token.contains("xmlns=") {
        return TokenKind::NamespaceFragment;
    }
    TokenKind::Text
}

/// True when a `<!` token closes its own region: one-token comments and
/// CDATA sections, and DOCTYPE declarations without an internal subset.
fn closes_own_declaration(token: &str) -> bool {
    token.contains("-->") || token.contains("]>") || token.contains("!DOCTYPE")
}

/// Line prefixes by depth: entry 0 is `"\n"`, entry `i` appends one more
/// indentation unit. Grown lazily, so nesting depth is unbounded.
struct IndentTable {
    unit: String,
    entries: Vec<String>,
}

impl IndentTable {
    fn new(indent: &IndentSpec) -> Self {
        Self {
            unit: indent.unit(),
            entries: vec!["\n".to_owned()],
        }
    }

    fn prefix(&mut self, depth: usize) -> &str {
        while self.entries.len() <= depth {
            let mut next = self.entries[self.entries.len() - 1].clone();
            next.push_str(&self.unit);
            self.entries.push(next);
        }
        &self.entries[depth]
    }
}

/// Reformat XML text with canonical indentation
///
/// This is the formatter's entire public surface: a pure function of the
/// input text and the indentation unit. It never fails; malformed input
/// produces best-effort output rather than an error.
///
/// Tags are placed one per line at their nesting depth, with these
/// exceptions: an element whose closing tag immediately follows its opening
/// tag stays on one line, text content stays attached to its tag, and the
/// interior of comments, CDATA sections, and DOCTYPE declarations is
/// reproduced verbatim. A namespace declaration is split onto its own line
/// one level below the tag that carries it.
///
/// # Example
///
/// ```rust
/// use xmlfmt::formatter::{IndentSpec, format_xml};
///
/// let input = "<root><child><subchild>value</subchild></child></root>";
/// let expected = "\
/// <root>
///     <child>
///         <subchild>value</subchild>
///     </child>
/// </root>";
/// assert_eq!(format_xml(input, &IndentSpec::Spaces(4)), expected);
/// ```
pub fn format_xml(input: &str, indent: &IndentSpec) -> String {
    let normalized = normalize(input);
    let tokens = tokenize(&normalized);

    let mut table = IndentTable::new(indent);
    let mut depth: usize = 0;
    let mut in_region = false;
    let mut out = String::with_capacity(normalized.len() + tokens.len() * 4);

    for ix in 0..tokens.len() {
        let token = tokens[ix];
        let prev = if ix > 0 { Some(tokens[ix - 1]) } else { None };

        match classify(token, prev) {
            TokenKind::DeclarationStart => {
                out.push_str(table.prefix(depth));
                out.push_str(token);
                in_region = !closes_own_declaration(token);
            }
            TokenKind::DeclarationEnd => {
                out.push_str(token);
                in_region = false;
            }
            TokenKind::MatchedPair => {
                out.push_str(token);
                if !in_region {
                    depth = depth.saturating_sub(1);
                }
            }
            TokenKind::OpenTag => {
                if in_region {
                    out.push_str(token);
                } else {
                    out.push_str(table.prefix(depth));
                    out.push_str(token);
                    depth += 1;
                }
            }
            TokenKind::OpenCloseTag | TokenKind::SelfClosing => {
                if in_region {
                    out.push_str(token);
                } else {
                    out.push_str(table.prefix(depth));
                    out.push_str(token);
                }
            }
            TokenKind::CloseTag => {
                // Depth drops before emission so the closing tag lines up
                // with its opening tag. Saturation keeps stray closers in
                // malformed input from panicking.
                depth = depth.saturating_sub(1);
                if in_region {
                    out.push_str(token);
                } else {
                    out.push_str(table.prefix(depth));
                    out.push_str(token);
                }
            }
            TokenKind::ProcessingInstruction | TokenKind::NamespaceFragment => {
                out.push_str(table.prefix(depth));
                out.push_str(token);
            }
            TokenKind::Text => out.push_str(token),
        }
    }

    match out.strip_prefix('\n') {
        Some(rest) => rest.to_owned(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_spec_parsing() {
        assert_eq!("0".parse::<IndentSpec>().unwrap(), IndentSpec::Spaces(0));
        assert_eq!("8".parse::<IndentSpec>().unwrap(), IndentSpec::Spaces(8));
        assert_eq!(
            "  ".parse::<IndentSpec>().unwrap(),
            IndentSpec::Literal("  ".to_owned())
        );
    }

    #[test]
    fn indent_table_grows_on_demand() {
        let mut table = IndentTable::new(&IndentSpec::Spaces(2));
        assert_eq!(table.prefix(0), "\n");
        assert_eq!(table.prefix(3), "\n      ");
        // Well past the fixed ceiling of the precomputed-table approach.
        assert_eq!(table.prefix(150).len(), 1 + 150 * 2);
    }

    #[test]
    fn classification_priority() {
        assert_eq!(classify("<!-- hi -->", None), TokenKind::DeclarationStart);
        assert_eq!(classify("<x> done]]>", None), TokenKind::DeclarationEnd);
        assert_eq!(classify("<a>", None), TokenKind::OpenTag);
        assert_eq!(classify("<a>text", None), TokenKind::OpenTag);
        assert_eq!(classify("<a>text</a>", None), TokenKind::OpenCloseTag);
        assert_eq!(classify("</a>", None), TokenKind::CloseTag);
        assert_eq!(classify("<a/>", None), TokenKind::SelfClosing);
        assert_eq!(
            classify("<?xml version=\"1.0\"?>", None),
            TokenKind::ProcessingInstruction
        );
        assert_eq!(
            classify("xmlns:x=\"u\">", None),
            TokenKind::NamespaceFragment
        );
        assert_eq!(classify("plain text", None), TokenKind::Text);
    }

    #[test]
    fn matched_pair_requires_identical_names() {
        assert_eq!(classify("</a>", Some("<a>value")), TokenKind::MatchedPair);
        assert_eq!(classify("</ab>", Some("<a>value")), TokenKind::CloseTag);
        assert_eq!(classify("</a>", Some("</a>")), TokenKind::CloseTag);
        assert_eq!(
            classify("</x:child>", Some("<x:child>v")),
            TokenKind::MatchedPair
        );
    }

    #[test]
    fn stray_closing_tags_never_panic() {
        let out = format_xml("</a></b></c>", &IndentSpec::Spaces(2));
        assert!(!out.is_empty());
    }
}
