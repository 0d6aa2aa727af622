use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shiftplan::config::Config;

mod commands;

use commands::{AppContext, ImportParams, ScheduleParams};

#[derive(Parser)]
#[command(
    name = "shiftplan",
    version,
    about = "Assign employees to shifts by skill, availability and weekly hours",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Configuration file (TOML); environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and store employee and shift records
    Import {
        /// JSON file with employee records
        #[arg(short, long)]
        employees: Option<PathBuf>,

        /// JSON file with shift records
        #[arg(short, long)]
        shifts: Option<PathBuf>,
    },

    /// Compute a schedule from the stored records
    Schedule {
        /// Skip the optimization service
        #[arg(long, default_value = "false")]
        heuristic_only: bool,

        /// Scheduling period (YYYY-MM-DD/YYYY-MM-DD)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show the stored schedule
    Show {
        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Probe the optimization service
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // Initialize tracing/logging
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("shiftplan starting");

    match cli.command {
        Commands::Import { employees, shifts } => {
            tracing::info!(employees = ?employees, shifts = ?shifts, "Starting import command");
            let ctx = AppContext::open(config)?;
            commands::import(&ctx, ImportParams { employees, shifts }).await?;
        }

        Commands::Schedule {
            heuristic_only,
            period,
        } => {
            tracing::info!(
                heuristic_only = %heuristic_only,
                period = ?period,
                "Starting schedule command"
            );
            let ctx = AppContext::open(config)?;
            commands::schedule(
                &ctx,
                ScheduleParams {
                    heuristic_only,
                    period,
                },
            )
            .await?;
        }

        Commands::Show { json } => {
            tracing::info!(json = %json, "Starting show command");
            let ctx = AppContext::open(config)?;
            commands::show(&ctx, json).await?;
        }

        Commands::Health => {
            tracing::info!(url = %config.optimizer.url, "Starting health command");
            commands::health(&config).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("shiftplan=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("shiftplan={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
