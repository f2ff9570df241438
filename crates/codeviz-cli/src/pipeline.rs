//! Core processing pipeline: discover → extract → build graph → serialize → render.

use std::time::Instant;

use tracing::{debug, info, warn};

use codeviz_core::{Error, Graph, GraphBuilder, Result, discover, expand_globs};
use codeviz_dot::serialize;

use crate::render::{dot_path_for, output_format, render};
use crate::{CodevizOptions, RunOutcome};

/// Run the full pipeline for one set of options.
///
/// 1. Expand ignore globs and discover files
/// 2. Expand highlight globs
/// 3. Build the graph (reads every file)
/// 4. Serialize to DOT and write `<output stem>.dot`
/// 5. Render with Graphviz (unless `dot_only`)
///
/// The graph is fully built before anything is written, so a failed run
/// leaves no partial `.dot` file behind.
pub fn run_pipeline(opts: &CodevizOptions) -> Result<RunOutcome> {
    if !opts.dot_only {
        output_format(&opts.output)?;
    }

    // 1. Discover
    let ignore = expand_globs(&opts.ignore)?;
    if !ignore.is_empty() {
        debug!(
            "Ignore files:\n\t{}",
            ignore.iter().cloned().collect::<Vec<_>>().join("\n\t")
        );
    }

    let files = discover(
        &opts.paths,
        &opts.extensions.all(),
        &ignore,
        &opts.catalog_options(),
    )?;

    // 2. Highlight set
    let highlight = expand_globs(&opts.highlight)?;

    // 3. Build
    let graph = GraphBuilder::new(&opts.extensions)
        .with_highlight(&highlight)
        .with_require_connected(opts.must_include)
        .build(&files)?;

    let reported = report_diagnostics(&graph);
    if reported > 0 {
        debug!("Reported {} diagnostics", reported);
    }

    if graph.is_empty() {
        return Ok(RunOutcome::NothingToDo);
    }

    // 4. Serialize
    let write_start = Instant::now();
    let dot_path = dot_path_for(&opts.output);
    let text = serialize(&graph, &opts.style_options());
    std::fs::write(&dot_path, text).map_err(|err| {
        Error::from(err)
            .with_operation("pipeline::write_dot")
            .with_context("path", dot_path.display().to_string())
    })?;
    info!(
        "DOT write: {:.2}s ({})",
        write_start.elapsed().as_secs_f64(),
        dot_path.display()
    );

    if opts.dot_only {
        return Ok(RunOutcome::DotWritten { dot_path });
    }

    // 5. Render
    let render_start = Instant::now();
    render(&dot_path, &opts.output)?;
    info!("Graphviz: {:.2}s", render_start.elapsed().as_secs_f64());

    Ok(RunOutcome::Rendered {
        dot_path,
        output: opts.output.clone(),
    })
}

/// Print every recoverable diagnostic as a warning. They never change the
/// outcome of the run. Returns how many were reported.
fn report_diagnostics(graph: &Graph) -> usize {
    for diag in graph.diagnostics() {
        warn!(kind = diag.kind().as_str(), "{}", diag);
    }
    graph.diagnostics().len()
}
