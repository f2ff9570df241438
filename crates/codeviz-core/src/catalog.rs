//! File discovery and filtering for codeviz.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use glob::MatchOptions;
use ignore::WalkBuilder;
use tracing::{debug, info};

use codeviz_error::{Error, Result};

use crate::file::normalize_path;

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Options controlling directory expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Walk the full subtree of directory roots instead of their immediate entries.
    pub recursive: bool,
    /// Honour `.gitignore`, `.ignore` and hidden-file rules while walking.
    pub respect_gitignore: bool,
}

impl CatalogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_respect_gitignore(mut self, respect_gitignore: bool) -> Self {
        self.respect_gitignore = respect_gitignore;
        self
    }
}

fn has_extension(path: &str, extensions: &BTreeSet<String>) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(ext))
}

/// Lazily yield every regular file under `root`.
///
/// Non-recursive listing is the same walk capped at depth one, so both modes
/// go through the same filter in [`discover`].
fn walk_candidates<'a>(
    root: &'a str,
    options: &CatalogOptions,
) -> impl Iterator<Item = Result<String>> + 'a {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(options.respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .max_depth(if options.recursive { None } else { Some(1) });

    builder.build().filter_map(move |entry| match entry {
        Ok(entry) => {
            let is_file = entry.file_type().is_some_and(|ft| {
                ft.is_file() || (ft.is_symlink() && entry.path().is_file())
            });
            is_file.then(|| Ok(entry.path().to_string_lossy().into_owned()))
        }
        Err(err) => Some(Err(Error::traversal_failed(
            root,
            format!("failed to walk directory {root}: {err}"),
        )
        .with_operation("catalog::discover"))),
    })
}

/// Discover candidate files under `roots`.
///
/// Every candidate, whether named explicitly or found by walking a directory,
/// must carry one of `extensions` and must not be a member of `ignore`.
/// With no roots the immediate entries of the current directory are used,
/// whatever `options.recursive` says. The result is deduplicated
/// and sorted by path.
pub fn discover<S: AsRef<str>>(
    roots: &[S],
    extensions: &BTreeSet<String>,
    ignore: &BTreeSet<String>,
    options: &CatalogOptions,
) -> Result<BTreeSet<String>> {
    let discovery_start = Instant::now();

    let (roots, options): (Vec<&str>, CatalogOptions) = if roots.is_empty() {
        (vec!["."], options.clone().with_recursive(false))
    } else {
        (roots.iter().map(AsRef::as_ref).collect(), options.clone())
    };

    let mut files = BTreeSet::new();
    let mut ignored_count = 0usize;

    let mut admit = |path: &str| {
        let path = normalize_path(path);
        if !has_extension(&path, extensions) {
            return;
        }
        if ignore.contains(&path) {
            ignored_count += 1;
            return;
        }
        files.insert(path);
    };

    for root in roots {
        let root_path = Path::new(root);
        if root_path.is_file() {
            admit(root);
        } else if root_path.is_dir() {
            for candidate in walk_candidates(root, &options) {
                admit(&candidate?);
            }
        } else {
            return Err(Error::invalid_path(root).with_operation("catalog::discover"));
        }
    }

    if ignored_count > 0 {
        debug!("Ignored {} files matching ignore patterns", ignored_count);
    }

    info!(
        "File discovery: {:.2}s ({} files)",
        discovery_start.elapsed().as_secs_f64(),
        files.len()
    );
    debug!("Found files:\n\t{}", files.iter().cloned().collect::<Vec<_>>().join("\n\t"));

    Ok(files)
}

/// Expand glob patterns against the filesystem into a set of paths.
///
/// `**` matches any number of directories. Wildcards never match a leading
/// `.`, so hidden files are only matched by patterns that spell the dot out.
/// The result is a plain set of matched paths so later membership tests are
/// exact lookups.
pub fn expand_globs<S: AsRef<str>>(patterns: &[S]) -> Result<BTreeSet<String>> {
    let mut matched = BTreeSet::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = glob::glob_with(pattern, GLOB_OPTIONS).map_err(|err| {
            Error::invalid_argument(format!("invalid glob pattern '{pattern}': {err}"))
                .with_operation("catalog::expand_globs")
                .with_context("pattern", pattern)
        })?;

        for entry in paths {
            match entry {
                Ok(path) => {
                    matched.insert(normalize_path(&path.to_string_lossy()));
                }
                Err(err) => debug!(pattern, error = %err, "skipping unreadable glob match"),
            }
        }
    }

    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_has_extension() {
        let set = exts(&["c", "h"]);
        assert!(has_extension("src/main.c", &set));
        assert!(has_extension("util.h", &set));
        assert!(!has_extension("main.cpp", &set));
        assert!(!has_extension("Makefile", &set));
        assert!(!has_extension("archive.c.bak", &set));
    }

    #[test]
    fn test_options_builder() {
        let opts = CatalogOptions::new()
            .with_recursive(true)
            .with_respect_gitignore(true);
        assert!(opts.recursive);
        assert!(opts.respect_gitignore);
        assert_eq!(CatalogOptions::default(), CatalogOptions::new());
    }

    #[test]
    fn test_invalid_glob_is_invalid_argument() {
        let err = expand_globs(&["src/[*.c"]).unwrap_err();
        assert_eq!(err.kind(), codeviz_error::ErrorKind::InvalidArgument);
        assert_eq!(err.context_value("pattern"), Some("src/[*.c"));
    }

    #[test]
    fn test_missing_root_is_invalid_path() {
        let err = discover(
            &["no/such/root"],
            &exts(&["c"]),
            &BTreeSet::new(),
            &CatalogOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), codeviz_error::ErrorKind::InvalidPath);
        assert_eq!(err.context_value("path"), Some("no/such/root"));
    }
}
