//! The include graph model produced by [`crate::builder::GraphBuilder`].

use std::fmt;

use codeviz_error::ErrorKind;

use crate::file::{FileKind, SourceFile};

/// Index of a node in [`Graph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One admitted file. The node's identity is its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    file: SourceFile,
    highlighted: bool,
}

impl Node {
    pub fn new(file: SourceFile, highlighted: bool) -> Self {
        Self { file, highlighted }
    }

    pub fn path(&self) -> &str {
        self.file.path()
    }

    pub fn basename(&self) -> &str {
        self.file.basename()
    }

    pub fn kind(&self) -> FileKind {
        self.file.kind()
    }

    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }
}

/// A resolved include, `source` includes `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// The include string matched more than one node by basename.
    pub collision: bool,
}

/// Recoverable conditions found while building the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An include target matched several nodes by basename.
    AmbiguousInclude {
        source: String,
        include: String,
        candidates: Vec<String>,
    },
    /// A file had neither a source nor a header extension and was skipped.
    UnsupportedFileType { path: String },
}

impl Diagnostic {
    /// Error kind under which the condition is reported.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Diagnostic::AmbiguousInclude { .. } => ErrorKind::AmbiguousInclude,
            Diagnostic::UnsupportedFileType { .. } => ErrorKind::UnsupportedFileType,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousInclude {
                source,
                include,
                candidates,
            } => {
                write!(
                    f,
                    "Multiple headers with the same basename found for {source} (include \"{include}\"):"
                )?;
                for candidate in candidates {
                    write!(f, "\n - {candidate}")?;
                }
                Ok(())
            }
            Diagnostic::UnsupportedFileType { path } => {
                write!(f, "Skipping {path}: neither a source nor a header file")
            }
        }
    }
}

/// Nodes in catalog order, edges in emission order, plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    diagnostics: Vec<Diagnostic>,
}

impl Graph {
    pub(crate) fn new(nodes: Vec<Node>, edges: Vec<Edge>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            nodes,
            edges,
            diagnostics,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by its full path.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.path() == path).map(NodeId)
    }

    /// Edges as `(source path, target path, collision)` triples.
    pub fn edge_paths(&self) -> impl Iterator<Item = (&str, &str, bool)> + '_ {
        self.edges.iter().map(|e| {
            (
                self.node(e.source).path(),
                self.node(e.target).path(),
                e.collision,
            )
        })
    }
}
