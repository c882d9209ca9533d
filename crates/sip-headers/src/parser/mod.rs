//! Header parsing: grammar, syntax tree, builders and the extension registry.
//!
//! Parsing runs in two steps. The nom grammar turns a header line into a
//! labeled [`SyntaxTree`]; [`build_from_node`] then turns the root node into a
//! [`TypedHeader`], consulting a [`ParserRegistry`] for extension headers.
//!
//! ```rust
//! use rvoip_sip_headers::parser::parse_header;
//! use rvoip_sip_headers::TypedHeader;
//!
//! let header = parse_header("l: 349").unwrap();
//! assert!(matches!(header, TypedHeader::ContentLength(_)));
//! assert_eq!(header.render(), "Content-Length: 349");
//! ```

use std::sync::Arc;

use nom::IResult;

pub mod build;
pub mod grammar;
pub mod registry;
pub mod separators;
pub mod syntax;
pub mod whitespace;

pub use build::build_from_node;
pub use registry::{register_parser, unregister_parser, BuilderFn, ParserRegistry};
pub use syntax::{parse_tree, Node, NodeRef, SyntaxTree, EXTENSION_HEADER};

use crate::error::Result;
use crate::types::headers::TypedHeader;

/// Result type of the byte-level grammar rules
pub type ParseResult<'a, O> = IResult<&'a [u8], O>;

/// Parser bound to an extension registry
#[derive(Debug, Clone)]
pub struct HeaderParser {
    registry: Arc<ParserRegistry>,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderParser {
    /// Parser using the process-wide registry
    pub fn new() -> Self {
        Self::with_registry(ParserRegistry::global())
    }

    pub fn with_registry(registry: Arc<ParserRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ParserRegistry> {
        &self.registry
    }

    /// Parses one header line into its syntax tree
    pub fn parse_tree(&self, text: &str) -> Result<SyntaxTree> {
        parse_tree(text)
    }

    /// Parses one header line, optionally terminated by CRLF
    pub fn parse(&self, text: &str) -> Result<TypedHeader> {
        let tree = parse_tree(text)?;
        build_from_node(tree.root(), &self.registry)
    }

    /// Parses a block of header lines
    ///
    /// Lines end at a CRLF (or bare LF) that is not followed by a space or
    /// tab; folded continuation lines stay with their header. Blank lines are
    /// skipped.
    pub fn parse_all(&self, text: &str) -> Result<Vec<TypedHeader>> {
        split_lines(text)
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse(line))
            .collect()
    }
}

/// Splits `text` at line breaks that do not start a folded continuation
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for (idx, &b) in bytes.iter().enumerate() {
        if b != b'\n' {
            continue;
        }
        if matches!(bytes.get(idx + 1), Some(b' ' | b'\t')) {
            continue;
        }
        let end = if idx > start && bytes[idx - 1] == b'\r' { idx - 1 } else { idx };
        lines.push(&text[start..end]);
        start = idx + 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Parses one header line with the default parser
pub fn parse_header(text: &str) -> Result<TypedHeader> {
    HeaderParser::new().parse(text)
}

/// Parses a block of CRLF-separated header lines with the default parser
pub fn parse_headers(text: &str) -> Result<Vec<TypedHeader>> {
    HeaderParser::new().parse_all(text)
}
