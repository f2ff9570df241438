//! Graphviz invocation.
//!
//! Rendering is two passes over the written `.dot` file: `dot` checks that
//! the layout succeeds, then `neato` converts it into the requested format.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use codeviz_core::{Error, Result};

/// Intermediate DOT path for an output graphic: same stem, `.dot` extension.
pub fn dot_path_for(output: &Path) -> PathBuf {
    output.with_extension("dot")
}

/// Graphviz output format selected by the output path's extension.
pub fn output_format(output: &Path) -> Result<String> {
    output
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "output file '{}' needs an extension to select the image format",
                output.display()
            ))
            .with_operation("render::output_format")
            .with_context("output", output.display().to_string())
        })
}

/// Render `dot_path` into `output` with Graphviz.
pub fn render(dot_path: &Path, output: &Path) -> Result<()> {
    let format = output_format(output)?;

    run_tool("dot", &[dot_path.as_os_str()])?;
    println!("Generated dot file: {}", dot_path.display());

    let stdout = run_tool(
        "neato",
        &[
            OsStr::new("-Gstart=5"),
            dot_path.as_os_str(),
            OsStr::new("-T"),
            OsStr::new(&format),
            OsStr::new("-o"),
            output.as_os_str(),
        ],
    )?;
    if !stdout.is_empty() {
        debug!("{}", stdout);
    }

    println!("Generated graph: {}", output.display());
    Ok(())
}

fn command_line(program: &str, args: &[&OsStr]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run an external tool, returning its stdout on success.
fn run_tool(program: &str, args: &[&OsStr]) -> Result<String> {
    let cmd = command_line(program, args);
    debug!("Command: {}", cmd);

    let output = Command::new(program).args(args).output().map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            Error::tool_not_found(program).with_operation("render::run_tool")
        } else {
            Error::render_failed(&cmd, format!("failed to run command: {cmd}"))
                .with_operation("render::run_tool")
                .set_source(err)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::render_failed(
            &cmd,
            format!("{program} exited with {}: {}", output.status, stderr.trim()),
        )
        .with_operation("render::run_tool"));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
