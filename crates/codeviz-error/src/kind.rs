//! Error kinds for codeviz operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell fatal discovery and extraction
/// failures apart from the recoverable diagnostics the graph builder records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid argument passed by the caller (bad glob, bad output path)
    InvalidArgument,

    // =========================================================================
    // Discovery errors
    // =========================================================================
    /// A root path is neither a file nor a directory
    InvalidPath,

    /// Directory traversal failed
    TraversalFailed,

    // =========================================================================
    // Extraction errors
    // =========================================================================
    /// A cataloged file could not be opened or decoded
    FileRead,

    // =========================================================================
    // Graph diagnostics (recoverable)
    // =========================================================================
    /// Path has neither a source nor a header extension
    UnsupportedFileType,

    /// Include target matched several files by basename
    AmbiguousInclude,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Render errors
    // =========================================================================
    /// External layout tool is not installed
    ToolNotFound,

    /// External layout tool exited with a failure status
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
