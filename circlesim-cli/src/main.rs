use anyhow::{Context, Result};
use circlesim_core::run_scene;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod sandbox_app;

#[derive(Parser)]
#[command(name = "circlesim")]
#[command(about = "circlesim - a 2D rigid-circle physics sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene headless and print the final body states
    Run {
        /// Path to the scene YAML file
        file: PathBuf,
    },
    /// Open a scene in the interactive viewer
    View {
        /// Path to the scene YAML file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run { file } => run_file(&file),
        Commands::View { file } => view_file(file),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_file(file: &PathBuf) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let result = run_scene(&source)?;

    tracing::info!(steps = result.steps, bodies = result.bodies.len(), "scene finished");

    for (i, body) in result.bodies.iter().enumerate() {
        println!(
            "body[{}] pos=({}, {}) vel=({}, {})",
            i, body.position.x, body.position.y, body.velocity.x, body.velocity.y
        );
    }

    Ok(())
}

fn view_file(file: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "circlesim",
        options,
        Box::new(move |cc| Ok(Box::new(sandbox_app::SandboxApp::new(file, cc)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}
