//! The annotated template tree.

use std::fmt;
use std::path::PathBuf;

use weave_parse::{parse_segment, parse_template, Directive, ParseError};

/// Whether a node (and the branches it produces) is a file or a directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::File => "file",
            NodeKind::Directory => "dir",
        })
    }
}

/// One template entry with its parsed directive.
///
/// The root node stands for the template directory itself: its name is
/// empty and it never contributes a path segment.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpansionNode {
    /// Entry name as written, directive included.
    pub name: String,
    pub directive: Option<Directive>,
    pub kind: NodeKind,
    /// Path of the entry relative to the template root. File contents are
    /// read from here.
    pub source: PathBuf,
    /// Children in byte-wise name order. Always empty for files.
    pub children: Vec<ExpansionNode>,
}

impl ExpansionNode {
    /// Parse `name` once and build a childless node.
    ///
    /// Names without a directive are still checked for well-formed `{{ }}`
    /// holes so malformed names fail before expansion starts.
    pub fn new(
        name: impl Into<String>,
        kind: NodeKind,
        source: impl Into<PathBuf>,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        let directive = parse_segment(&name)?;
        if directive.is_none() {
            parse_template(&name)?;
        }
        Ok(ExpansionNode {
            name,
            directive,
            kind,
            source: source.into(),
            children: Vec::new(),
        })
    }

    /// The template root.
    pub fn root(children: Vec<ExpansionNode>) -> Self {
        ExpansionNode {
            name: String::new(),
            directive: None,
            kind: NodeKind::Directory,
            source: PathBuf::new(),
            children,
        }
    }

    /// A file node whose source path is its own name.
    pub fn file(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        let source = PathBuf::from(&name);
        ExpansionNode::new(name, NodeKind::File, source)
    }

    /// A directory node whose source path is its own name.
    pub fn directory(
        name: impl Into<String>,
        children: Vec<ExpansionNode>,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        let source = PathBuf::from(&name);
        let mut node = ExpansionNode::new(name, NodeKind::Directory, source)?;
        node.children = children;
        Ok(node)
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}
