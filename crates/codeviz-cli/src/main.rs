use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use codeviz::{CodevizOptions, DEFAULT_OUTFILE, RetCode, RunOutcome, run_main};
use codeviz_core::Extensions;

#[derive(Parser, Debug)]
#[command(
    name = "codeviz",
    about = "Generate a code dependency graph for C/C++ projects",
    version
)]
pub struct Cli {
    /// Files and directories to scan (default: current directory)
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Recursive scan of source and header files
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// Output filename; its extension selects the image format
    #[arg(short = 'o', long = "outfile", value_name = "FILE", default_value = DEFAULT_OUTFILE)]
    outfile: PathBuf,

    /// Do not use colors to highlight source and header files
    #[arg(short = 'n', long = "no-color")]
    no_color: bool,

    /// Only show source files whose includes name other scanned files
    #[arg(short = 'm', long = "must-include")]
    must_include: bool,

    /// Ignore files matching glob PATTERN (repeatable)
    #[arg(short = 'i', long = "ignore", value_name = "PATTERN", action = clap::ArgAction::Append)]
    ignore: Vec<String>,

    /// Highlight files matching glob PATTERN (repeatable)
    #[arg(short = 'H', long = "highlight", value_name = "PATTERN", action = clap::ArgAction::Append)]
    highlight: Vec<String>,

    /// Honour .gitignore and .ignore files while walking directories
    #[arg(long = "gitignore")]
    gitignore: bool,

    /// Write the .dot file only, without running Graphviz
    #[arg(long = "dot-only")]
    dot_only: bool,

    /// Verbose mode
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn into_options(self) -> CodevizOptions {
        CodevizOptions {
            paths: self.paths,
            recursive: self.recursive,
            respect_gitignore: self.gitignore,
            ignore: self.ignore,
            highlight: self.highlight,
            must_include: self.must_include,
            use_color: !self.no_color,
            output: self.outfile,
            dot_only: self.dot_only,
            extensions: Extensions::default(),
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

pub fn run(args: Cli) -> anyhow::Result<RunOutcome> {
    let total_start = Instant::now();
    init_tracing(args.verbose);

    let opts = args.into_options();
    let outcome = run_main(&opts).context("codeviz failed")?;

    if outcome == RunOutcome::NothingToDo {
        println!("No source files found.");
    }

    tracing::info!(
        total_secs = total_start.elapsed().as_secs_f64(),
        "complete"
    );
    Ok(outcome)
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let code = match run(args) {
        Ok(outcome) => outcome.ret_code(),
        Err(e) => {
            eprintln!("ERROR - {e:#}");
            tracing::error!(error = %e, "execution failed");
            RetCode::Error
        }
    };
    ExitCode::from(code as u8)
}
