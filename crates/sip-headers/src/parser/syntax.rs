//! Labeled syntax tree produced by the header grammar.
//!
//! Every node carries a grammar label and the byte range it covers in the
//! source text. Builders walk the tree through [`NodeRef`], looking children
//! up by label.

use std::ops::Range;

use super::grammar::Grammar;
use crate::error::Result;

/// Label of the root node for headers without a dedicated grammar rule
pub const EXTENSION_HEADER: &str = "extension-header";

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: &'static str,
    pub span: Range<usize>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(label: &'static str, span: Range<usize>) -> Self {
        Self {
            label,
            span,
            children: Vec::new(),
        }
    }

    pub fn branch(label: &'static str, span: Range<usize>, children: Vec<Node>) -> Self {
        Self {
            label,
            span,
            children,
        }
    }
}

/// Borrowed view of a node together with the text it was parsed from
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
    src: &'a str,
}

impl<'a> NodeRef<'a> {
    pub fn new(node: &'a Node, src: &'a str) -> Self {
        Self { node, src }
    }

    pub fn label(&self) -> &'static str {
        self.node.label
    }

    pub fn span(&self) -> Range<usize> {
        self.node.span.clone()
    }

    /// Source text covered by this node
    pub fn text(&self) -> &'a str {
        self.src.get(self.node.span.clone()).unwrap_or_default()
    }

    /// First child labeled `label`
    pub fn child(&self, label: &str) -> Option<NodeRef<'a>> {
        self.children(label).next()
    }

    /// Text of the first child labeled `label`
    pub fn child_text(&self, label: &str) -> Option<&'a str> {
        self.child(label).map(|c| c.text())
    }

    /// All children labeled `label`, in order
    pub fn children<'l>(&self, label: &'l str) -> impl Iterator<Item = NodeRef<'a>> + 'l
    where
        'a: 'l,
    {
        let (node, src) = (self.node, self.src);
        node.children
            .iter()
            .filter(move |n| n.label == label)
            .map(move |n| NodeRef::new(n, src))
    }

    /// All children, in order
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let (node, src) = (self.node, self.src);
        node.children.iter().map(move |n| NodeRef::new(n, src))
    }
}

/// A parsed header line: the source text and its root node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    src: String,
    root: Node,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.root, &self.src)
    }

    pub fn source(&self) -> &str {
        &self.src
    }
}

/// Parses one header line (`name: value`, optionally followed by CRLF) into a
/// syntax tree
///
/// The root is labeled with the canonical header name for known headers and
/// [`EXTENSION_HEADER`] otherwise. Whatever the label, the root spans the
/// header value.
pub fn parse_tree(text: &str) -> Result<SyntaxTree> {
    let root = Grammar::new(text.as_bytes()).header()?;
    Ok(SyntaxTree {
        src: text.to_string(),
        root,
    })
}
