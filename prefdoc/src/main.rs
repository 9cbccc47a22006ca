//! CLI entrypoint for `prefdoc`.

#![allow(
    clippy::print_stdout,
    reason = "validation reports are part of the CLI contract"
)]
#![allow(
    clippy::print_stderr,
    reason = "structural failures are reported on stderr"
)]

use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use prefdoc::cli::{Args, SourceSet};
use prefdoc::entities::EntityTable;
use prefdoc::error::PrefdocError;
use prefdoc::markup::Document;
use prefdoc::{defaults, output, render, walk, xref};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(path) => {
            info!(%path, "documentation written");
            ExitCode::SUCCESS
        }
        Err(PrefdocError::Undocumented(report)) => {
            println!("{report}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("prefdoc: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<Utf8PathBuf, PrefdocError> {
    let sources = SourceSet::from_paths(&args.sources)?;
    let ns = args.namespace();

    let entities = EntityTable::parse(&read(&sources.entities)?)?;
    debug!(entities = entities.len(), "parsed entity table");

    let mut doc = Document::parse(&read(&sources.markup)?, &entities)?;
    let defaults = defaults::parse_defaults(&read(&sources.defaults)?, &ns)?;

    walk::propagate_labels(&mut doc)?;
    let mut outcome = walk::correlate(&doc, &ns)?;
    xref::cross_reference(&mut outcome.records, &defaults, &ns)?;

    let markdown = render::render(&outcome, &sources.markup)?;
    output::write_markdown(&args.output, &markdown)?;
    Ok(args.output.clone())
}

fn read(path: &Utf8Path) -> Result<String, PrefdocError> {
    std::fs::read_to_string(path).map_err(|source| PrefdocError::Io {
        path: path.to_path_buf(),
        source,
    })
}
