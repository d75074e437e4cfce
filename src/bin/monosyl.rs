//! Monosyl CLI - batch monosyllabic English pipeline
//!
//! Thin command layer over the library: the full pipeline run plus small
//! inspection commands for the individual stages (syllabification, syllable
//! generation, respelling, graph export).

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run(args) => {
            cli::run_command(args).await?;
        }
        Commands::Syllabify(args) => {
            cli::syllabify_command(args)?;
        }
        Commands::Generate(args) => {
            cli::generate_command(args).await?;
        }
        Commands::GraphDot(args) => {
            cli::graph_dot_command(args).await?;
        }
        Commands::Respell(args) => {
            cli::respell_command(args);
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
    }

    Ok(())
}
