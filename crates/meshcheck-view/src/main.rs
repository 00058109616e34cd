use anyhow::{Context, Result};
use clap::Parser;
use meshcheck_view::{ViewerConfig, ViewerSession};
use tracing_subscriber::EnvFilter;

mod cli;
#[cfg(feature = "gui")]
mod gui;
mod headless;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::CliArgs::parse();
    match args.mode {
        Some(cli::Mode::Headless { command }) => headless::run_headless(command),
        None => {
            let config = match &args.config {
                Some(path) => ViewerConfig::load(path)
                    .with_context(|| format!("read config {}", path.display()))?,
                None => ViewerConfig::default(),
            };
            let mut session = ViewerSession::new(config);
            if let Some(path) = &args.mesh {
                session
                    .load_path(path)
                    .with_context(|| format!("load mesh {}", path.display()))?;
            }
            run_gui(session)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "gui")]
fn run_gui(session: ViewerSession) -> Result<()> {
    gui::run_gui(session)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_session: ViewerSession) -> Result<()> {
    anyhow::bail!("GUI support disabled. Rebuild with --features gui.");
}
