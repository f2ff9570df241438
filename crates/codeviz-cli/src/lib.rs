//! codeviz command-line interface.
//!
//! [`run_main`] runs the whole pipeline for one [`CodevizOptions`] value.

pub mod pipeline;
pub mod render;

use std::path::PathBuf;

use codeviz_core::{CatalogOptions, Extensions, Result};
use codeviz_dot::StyleOptions;

pub use pipeline::run_pipeline;

/// Default output graphic when `--outfile` is not given.
pub const DEFAULT_OUTFILE: &str = "codeviz.png";

/// Options for running codeviz.
///
/// Built once from the command line and passed by reference everywhere.
#[derive(Debug, Clone)]
pub struct CodevizOptions {
    /// Root files and directories; empty means the current directory.
    pub paths: Vec<String>,
    pub recursive: bool,
    pub respect_gitignore: bool,
    /// Glob patterns whose matches are left out of the catalog.
    pub ignore: Vec<String>,
    /// Glob patterns whose matches are drawn with the highlight color.
    pub highlight: Vec<String>,
    pub must_include: bool,
    pub use_color: bool,
    /// Final graphic; its extension selects the Graphviz output format.
    pub output: PathBuf,
    /// Stop after writing the `.dot` file.
    pub dot_only: bool,
    pub extensions: Extensions,
}

impl Default for CodevizOptions {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            recursive: false,
            respect_gitignore: false,
            ignore: Vec::new(),
            highlight: Vec::new(),
            must_include: false,
            use_color: true,
            output: PathBuf::from(DEFAULT_OUTFILE),
            dot_only: false,
            extensions: Extensions::default(),
        }
    }
}

impl CodevizOptions {
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions::new()
            .with_recursive(self.recursive)
            .with_respect_gitignore(self.respect_gitignore)
    }

    pub fn style_options(&self) -> StyleOptions {
        StyleOptions::default().with_color(self.use_color)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No file survived discovery and filtering.
    NothingToDo,
    /// The `.dot` file was written and rendering was skipped.
    DotWritten { dot_path: PathBuf },
    /// The `.dot` file was written and Graphviz produced the graphic.
    Rendered { dot_path: PathBuf, output: PathBuf },
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetCode {
    Ok = 0,
    Error = 1,
    Warning = 3,
}

impl RunOutcome {
    pub fn ret_code(&self) -> RetCode {
        match self {
            RunOutcome::NothingToDo => RetCode::Warning,
            RunOutcome::DotWritten { .. } | RunOutcome::Rendered { .. } => RetCode::Ok,
        }
    }
}

/// Main entry point
pub fn run_main(opts: &CodevizOptions) -> Result<RunOutcome> {
    run_pipeline(opts)
}
