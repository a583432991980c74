//! libmesh_citations - Papers by People Using LibMesh
//!
//! Renders the yearly count of papers by people using libMesh as a bar chart
//! and writes it to `libmesh_citations.pdf`, or `.png` with `--png`.

use anyhow::Context;
use clap::Parser;
use libmesh_citations::charts;
use libmesh_citations::cli::Cli;
use libmesh_citations::data::{self, MalformedTableError, LIBMESH_CITATIONS};
use libmesh_citations::{EXIT_EXPORT_ERROR, EXIT_SUCCESS, EXIT_TABLE_ERROR};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

/// derive -> render -> export, once.
fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    let spec = data::derive(LIBMESH_CITATIONS).context("citation table is malformed")?;
    let figure = charts::render(&spec);

    let target = cli.export_target();
    charts::export(figure, target, &cli.output_dir)
        .with_context(|| format!("failed to export {}", target.file_name()))
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<MalformedTableError>().is_some() {
        EXIT_TABLE_ERROR
    } else {
        EXIT_EXPORT_ERROR
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let code = match run(&cli) {
        Ok(path) => {
            println!("Chart written: {}", path.display());
            EXIT_SUCCESS
        }
        Err(error) => {
            eprintln!("error: {:#}", error);
            exit_code(&error)
        }
    };

    std::process::exit(code);
}
