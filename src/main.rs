//! Clipforge CLI
//!
//! Command-line interface for the Clipforge clip builder.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use clipforge::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Clipforge v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Clipforge v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Presets { json } => commands::list_presets(json)?,
        Commands::Generate {
            preset,
            output,
            rate,
            seed,
        } => commands::generate(&preset, &output, rate, seed)
            .with_context(|| format!("generating '{}'", preset))?,
        Commands::Export(args) => {
            let report = commands::export(&args)
                .with_context(|| format!("exporting to {}", args.output.display()))?;
            if !report.written {
                anyhow::bail!("clip does not meet device constraints");
            }
        }
        Commands::Validate {
            start,
            end,
            constraints,
        } => commands::validate(start, end, constraints.as_deref())?,
        Commands::Info { path } => {
            commands::info(&path).with_context(|| format!("reading {}", path.display()))?
        }
    }
    Ok(())
}
