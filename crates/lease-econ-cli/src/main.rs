mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lease::{AnalyzeArgs, ScheduleArgs};

/// Commercial lease economics from the landlord's side
#[derive(Parser)]
#[command(
    name = "lease",
    version,
    about = "Commercial lease economics: NER, NPV, concessions and payback",
    long_about = "A CLI for evaluating commercial lease deals with decimal precision. \
                  Projects monthly rent, values free rent, TI and landlord work, \
                  computes office or industrial commissions and reports Net Effective \
                  Rent, NPV and payback."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a lease deal (NER, NPV, concessions, payback)
    Analyze(AnalyzeArgs),
    /// Derive an annual rent schedule from an escalation method
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::lease::run_analyze(args),
        Commands::Schedule(args) => commands::lease::run_schedule(args),
        Commands::Version => {
            println!("lease {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
