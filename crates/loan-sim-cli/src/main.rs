mod commands;
mod input;
mod output;

use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use loan_sim_core::{EngineConfig, LoanSimulator, LogNotifier};

use commands::convert::ConvertArgs;
use commands::rates::RatesArgs;
use commands::simulate::{BatchArgs, SimulateArgs, VariableRateArgs};
use commands::Context;

/// Loan amortization simulations with decimal precision
#[derive(Parser)]
#[command(
    name = "loansim",
    version,
    about = "Loan amortization simulations with decimal precision",
    long_about = "Simulate fixed-rate loans priced by borrower age, variable-rate loans \
                  tied to a market index, and batches of either, with currency \
                  conversion and localized validation messages."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (.yaml, .yml or .json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Locale for validation messages (en, pt-BR)
    #[arg(long, default_value = "en", global = true)]
    locale: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a fixed-rate loan priced by the borrower's age
    Simulate(SimulateArgs),
    /// Simulate a loan with a fixed part plus a drifting index-linked part
    VariableRate(VariableRateArgs),
    /// Simulate a JSON array of fixed and variable-rate requests concurrently
    Batch(BatchArgs),
    /// Convert an amount between currencies
    Convert(ConvertArgs),
    /// Show the age bracket table, or the rate that applies to a birth date
    Rates(RatesArgs),
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_context(config: Option<&str>, locale: &str) -> Result<Context, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => {
            let config = EngineConfig::from_path(path)?;
            debug!(path, "engine configuration loaded");
            config
        }
        None => EngineConfig::default(),
    };
    Ok(Context {
        simulator: LoanSimulator::new(config)?.with_notifier(Arc::new(LogNotifier)),
        locale: locale.to_string(),
    })
}

fn dispatch(ctx: &Context, command: Commands) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    match command {
        Commands::Simulate(args) => commands::simulate::run_simulate(ctx, args),
        Commands::VariableRate(args) => commands::simulate::run_variable_rate(ctx, args),
        Commands::Batch(args) => commands::simulate::run_batch(ctx, args),
        Commands::Convert(args) => commands::convert::run_convert(ctx, args),
        Commands::Rates(args) => commands::rates::run_rates(ctx, args),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Commands::Version = cli.command {
        println!("loansim {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = build_context(cli.config.as_deref(), &cli.locale)
        .and_then(|ctx| dispatch(&ctx, cli.command));

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
