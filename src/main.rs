//! Battleview CLI - Command-line interface for viewing recorded battles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Battleview - step through recorded battles phase by phase
#[derive(Parser, Debug)]
#[command(name = "battleview")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded battle
    Replay {
        /// Battle record or turn report (.json)
        #[arg(required = true)]
        file: PathBuf,

        /// Battle number (required when the report holds several battles)
        #[arg(short, long)]
        battle: Option<u32>,

        /// Output format: tui, text, llm, or json
        #[arg(short, long, default_value = "tui")]
        format: cli::ReplayFormat,

        /// Start at specific phase
        #[arg(short = 'n', long)]
        phase: Option<usize>,

        /// Highlight player N's tokens
        #[arg(short, long)]
        player: Option<u32>,

        /// Phase delay in milliseconds when playing (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,
    },

    /// List the battles in a turn report
    List {
        /// Battle record or turn report (.json)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Check a battle record and its expanded phases
    Validate {
        /// Battle record or turn report (.json)
        #[arg(required = true)]
        file: PathBuf,

        /// Only check this battle
        #[arg(short, long)]
        battle: Option<u32>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Replay {
            file,
            battle,
            format,
            phase,
            player,
            speed,
        } => cli::replay::execute(&file, battle, format, phase, player, speed),

        Commands::List { file } => cli::list::execute(&file),

        Commands::Validate { file, battle } => cli::validate::execute(&file, battle),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
