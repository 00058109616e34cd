use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meshcheck-view")]
#[command(about = "Inspect mesh winding, normals and naming")]
#[command(args_conflicts_with_subcommands = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub mode: Option<Mode>,
    /// Mesh JSON file to open.
    pub mesh: Option<PathBuf>,
    /// Viewer configuration JSON file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Mode {
    Headless {
        #[command(subcommand)]
        command: HeadlessCommand,
    },
}

#[derive(Subcommand)]
pub enum HeadlessCommand {
    /// Print mesh statistics and per-face normals.
    Report(ReportArgs),
    /// Validate a mesh file.
    Check(CheckArgs),
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(long = "in")]
    pub input: PathBuf,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(long = "in")]
    pub input: PathBuf,
}
