use std::path::PathBuf;

use clap::Parser;

use crate::charts::ExportTarget;

#[derive(Parser, Debug)]
#[command(name = "libmesh_citations")]
#[command(author, version, about = "Bar graph of papers by people using libMesh, by year")]
#[command(long_about = "Renders the yearly count of papers by people using libMesh \
    as a bar chart and writes libmesh_citations.pdf (or .png).\n\n\
    Exit codes:\n  \
    0 - Chart written\n  \
    1 - Export failed\n  \
    2 - Citation table is malformed")]
pub struct Cli {
    /// Write a 200 DPI PNG instead of a PDF
    #[arg(long)]
    pub png: bool,

    /// Directory that receives the chart file
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn export_target(&self) -> ExportTarget {
        ExportTarget::from_png_flag(self.png)
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
