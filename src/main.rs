use anyhow::{Context, Result};
use clap::Parser;
use smc_processor::cli::Args;
use smc_processor::models::ProcessingStats;
use smc_processor::processor::BatchProcessor;
use std::process;
use tracing::debug;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    setup_logging(&args);

    match run(args) {
        Ok(stats) if stats.files_processed == 0 && stats.files_failed > 0 => {
            eprintln!("Error: all {} input file(s) failed", stats.files_failed);
            process::exit(1);
        }
        Ok(_stats) => {
            // Summary has already been printed by the processor
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<ProcessingStats> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let processor = BatchProcessor::new(args.inputs.clone()).with_config(args.to_config());
    let stats = runtime
        .block_on(processor.process())
        .context("Conversion failed")?;
    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smc_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
