mod cli;
mod fixture;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xsbridge_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "xsbridge",
    version,
    about = "xsbridge: legacy request normalization"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a request fixture and print the result as JSON
    Normalize {
        /// Path to a JSON request fixture
        #[arg(long)]
        request: PathBuf,

        /// Path to the xsbridge config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate configuration and exit
    CheckConfig {
        #[arg(long, default_value = "config/xsbridge.toml")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Normalize { request, config } => cli::normalize::run(&request, config.as_deref()),
        Command::CheckConfig { config } => cli::check_config::run(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
