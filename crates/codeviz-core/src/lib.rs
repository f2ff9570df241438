//! Include-graph construction for C/C++ projects.
//!
//! The pipeline is leaf-first:
//!
//! - [`catalog`]: discover files under roots, filtered by extension and ignore set
//! - [`include`]: strip comments and extract `#include` targets
//! - [`builder`]: turn the file set into a [`Graph`] of nodes and basename-resolved edges
//!
//! Rendering lives in `codeviz-dot`.

pub mod builder;
pub mod catalog;
pub mod file;
pub mod graph;
pub mod include;

pub use builder::GraphBuilder;
pub use catalog::{CatalogOptions, discover, expand_globs};
pub use codeviz_error::{Error, ErrorKind, Result};
pub use file::{Extensions, FileKind, SourceFile, basename, normalize_path};
pub use graph::{Diagnostic, Edge, Graph, Node, NodeId};
pub use include::{extract_includes, read_includes, strip_comments};
