use anyhow::{Context, Result};
use meshcheck_camera::DISTANCE_FACTOR;
use meshcheck_io::load_mesh;
use meshcheck_view::MeshReport;

use crate::cli::HeadlessCommand;

pub fn run_headless(command: HeadlessCommand) -> Result<()> {
    match command {
        HeadlessCommand::Report(args) => {
            let mesh = load_mesh(&args.input)
                .with_context(|| format!("load mesh {}", args.input.display()))?;
            let report = MeshReport::new(&mesh, DISTANCE_FACTOR);
            if args.json {
                let text = serde_json::to_string_pretty(&report).context("serialize report")?;
                println!("{text}");
            } else {
                print!("{}", report.to_text());
            }
            Ok(())
        }
        HeadlessCommand::Check(args) => {
            let mesh = load_mesh(&args.input)
                .with_context(|| format!("load mesh {}", args.input.display()))?;
            println!(
                "ok: {} ({} vertices, {} faces)",
                args.input.display(),
                mesh.vertices().len(),
                mesh.faces().len()
            );
            Ok(())
        }
    }
}
