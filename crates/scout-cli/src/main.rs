use std::io::{Write, stdout};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scout_cli::commands::{self, boards, check_name, decode, encode};
use scout_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout carries only command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut out = stdout().lock();

    match &cli.command {
        Some(Commands::Encode { file, strict }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");
            let script = commands::read_file_or_stdin(file.as_deref())?;
            encode::run(&mut out, &script, &config, *strict)?;
        }
        Some(Commands::Decode { encoded, json }) => {
            let encoded = commands::value_or_stdin(encoded.as_deref())?;
            decode::run(&mut out, &encoded, *json)?;
        }
        Some(Commands::CheckName { name }) => {
            if !check_name::run(&mut out, name)? {
                out.flush()?;
                std::process::exit(1);
            }
        }
        Some(Commands::Boards) => {
            boards::run(&mut out)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
