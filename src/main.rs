//! vikfile CLI
//!
//! Command-line interface for `.vik` project files.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use vikfile::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    info!("vikfile v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("vikfile v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn handle_command(cmd: Commands) -> anyhow::Result<ExitCode> {
    match cmd {
        Commands::Inspect { path, json } => commands::inspect(&path, json)
            .with_context(|| format!("inspecting {}", path.display()))?,
        Commands::Check { path, first_error } => {
            let failed = commands::check(&path, first_error)
                .with_context(|| format!("checking {}", path.display()))?;
            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Resave { input, output } => commands::resave(&input, &output)
            .with_context(|| format!("resaving {} to {}", input.display(), output.display()))?,
        Commands::New { path } => commands::new_project(&path)
            .with_context(|| format!("creating {}", path.display()))?,
    }
    Ok(ExitCode::SUCCESS)
}
