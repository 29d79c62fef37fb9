//! # XmlFmt - XML Pretty-Printer for Pre-Commit Checks
//!
//! XmlFmt reformats XML documents into a canonically indented form and reports
//! or fixes deviations from that form, intended as a pre-commit linting step.
//! The core is a single pure text transformation: tags are cut into a fragment
//! stream at `<` and namespace-declaration boundaries, each fragment is
//! classified by simple pattern tests, and output is reassembled with one tag
//! per line at its nesting depth.
//!
//! ## Status
//!
//! This is deliberately not an XML parser. It does not validate
//! well-formedness, builds no DOM, and on malformed input produces
//! best-effort output rather than an error. Well-formed UTF-8 documents are
//! the supported case.
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```rust
//! use xmlfmt::formatter::{IndentSpec, format_xml};
//!
//! let compact = "<root><child>value</child></root>";
//! let pretty = format_xml(compact, &IndentSpec::Spaces(4));
//! assert_eq!(pretty, "<root>\n    <child>value</child>\n</root>");
//! ```
//!
//! ### As a CLI Tool
//!
//! The library is also available as a command-line tool that prints a unified
//! diff for each file that is not canonically formatted (or rewrites it with
//! `--autofix`) and exits nonzero when any file needed changes. See the
//! `main` module for CLI usage details.
//!
//! ## Modules
//!
//! - [`tokenizer`] - Whitespace normalization and fragment extraction
//! - [`formatter`] - Token classification, indentation, and the public API
//!
//! ## Limitations
//!
//! - Malformed XML yields unspecified (but panic-free) output
//! - Comment, CDATA, and DOCTYPE interiors are reproduced verbatim, never
//!   re-wrapped
//! - Text content containing a literal `<` is cut at that character like any
//!   tag boundary

/// Fragment extraction from raw XML text
pub mod tokenizer;

/// Core formatting engine and public API
pub mod formatter;

#[cfg(test)]
mod debug;
