//! Source file handling.
use std::collections::BTreeSet;
use std::path::Path;

use codeviz_error::Result;
use strum_macros::{Display, IntoStaticStr};

use crate::include::read_includes;

/// Default extensions classified as [`FileKind::Source`].
pub const SOURCE_EXTENSIONS: [&str; 2] = ["c", "cpp"];

/// Default extensions classified as [`FileKind::Header`].
pub const HEADER_EXTENSIONS: [&str; 2] = ["h", "hpp"];

/// The two kinds of files the graph knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    Source,
    Header,
}

/// Extension sets used to classify paths into [`FileKind`]s.
///
/// Extensions are stored without the leading dot and compared exactly.
/// When an extension appears in both sets the source set wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions {
    source: BTreeSet<String>,
    header: BTreeSet<String>,
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new(SOURCE_EXTENSIONS, HEADER_EXTENSIONS)
    }
}

impl Extensions {
    pub fn new<S, H>(source: S, header: H) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let clean = |ext: &str| ext.trim_start_matches('.').to_string();
        Self {
            source: source.into_iter().map(|e| clean(e.as_ref())).collect(),
            header: header.into_iter().map(|e| clean(e.as_ref())).collect(),
        }
    }

    /// Classify a path by its extension.
    pub fn kind_of(&self, path: &str) -> Option<FileKind> {
        let ext = Path::new(path).extension()?.to_str()?;
        if self.source.contains(ext) {
            Some(FileKind::Source)
        } else if self.header.contains(ext) {
            Some(FileKind::Header)
        } else {
            None
        }
    }

    /// Union of source and header extensions, the catalog filter.
    pub fn all(&self) -> BTreeSet<String> {
        self.source.union(&self.header).cloned().collect()
    }

    pub fn source(&self) -> &BTreeSet<String> {
        &self.source
    }

    pub fn header(&self) -> &BTreeSet<String> {
        &self.header
    }
}

/// Final path segment of `path`, or `path` itself when it has none.
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Strip leading `./` segments so walked paths and glob matches agree.
pub fn normalize_path(path: &str) -> String {
    let mut trimmed = path;
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest.trim_start_matches('/');
    }
    if trimmed.is_empty() {
        ".".to_string()
    } else {
        trimmed.to_string()
    }
}

/// One cataloged file together with the includes it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    basename: String,
    kind: FileKind,
    included_targets: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, kind: FileKind, included_targets: Vec<String>) -> Self {
        let path = path.into();
        let basename = basename(&path).to_string();
        Self {
            path,
            basename,
            kind,
            included_targets,
        }
    }

    /// Read `path` from disk and extract its include targets.
    pub fn read(path: &str, kind: FileKind) -> Result<Self> {
        let includes = read_includes(path)?;
        Ok(Self::new(path, kind, includes))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Include targets in source order, duplicates preserved.
    pub fn included_targets(&self) -> &[String] {
        &self.included_targets
    }
}
