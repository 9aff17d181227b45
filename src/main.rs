//! Mother CLI - inspect and scaffold the scenario runner configuration

use clap::Parser;
use mother::commands::Commands;
use mother::{cli, common::logging};

#[derive(Parser)]
#[command(name = "mother", about = "Behavior-driven scenario runner for scripted UI tests")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    logging::init();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
