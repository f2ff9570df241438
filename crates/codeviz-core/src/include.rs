//! `#include` directive extraction.
//!
//! Comments are stripped before scanning, so directives that were commented
//! out never show up. Preprocessor conditionals are not evaluated: an include
//! inside a disabled `#if 0` branch is still reported.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use codeviz_error::{Error, Result};

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid")
});

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("line comment pattern is valid"));

static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*["<](?P<target>[^">\n]+)[">]"#)
        .expect("include directive pattern is valid")
});

/// Remove `/* */` and `//` comments from C/C++ text.
///
/// A block comment is replaced by the newlines it spanned (or a single space)
/// so that line structure, and therefore line-anchored matching, is kept.
pub fn strip_comments(content: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(content, |caps: &Captures| {
        let newlines = caps[0].matches('\n').count();
        if newlines == 0 {
            " ".to_string()
        } else {
            "\n".repeat(newlines)
        }
    });
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Extract include targets in source order, exactly as written.
pub fn extract_includes(content: &str) -> Vec<String> {
    let stripped = strip_comments(content);
    INCLUDE_DIRECTIVE
        .captures_iter(&stripped)
        .map(|caps| caps["target"].to_string())
        .collect()
}

/// Read `path` and extract its include targets.
///
/// Fails with a `FileRead` error when the file cannot be opened or is not
/// valid UTF-8.
pub fn read_includes(path: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| Error::file_read(path, err).with_operation("include::read_includes"))?;
    let includes = extract_includes(&content);
    trace!(path, count = includes.len(), "extracted includes");
    Ok(includes)
}
