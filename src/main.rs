//! @ai:module:intent CLI for retention metrics
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retention_metrics::{
    assess, AnalysisReport, JsonReporter, RetentionConfig, RetentionMetrics,
    RetentionMetricsTrait, TabularSink,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retention-metrics")]
#[command(about = "Retention statistics and benchmark gap analysis")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics and print them as JSON
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print only the flat metric table
        #[arg(long)]
        table: bool,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "retention.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("retention_metrics=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            table,
            compact,
        } => run(config, table, compact),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Compute, assess and print metrics for the configured dataset
/// @ai:effects fs:read, io
fn run(config_path: Option<PathBuf>, table_only: bool, compact: bool) -> Result<()> {
    let config = load_or_default_config(config_path)?;

    let series = config.dataset.series().context("Invalid dataset")?;
    let benchmark = config.dataset.benchmark().context("Invalid benchmark")?;

    tracing::info!(
        "Analysing {} periods against benchmark {}",
        series.len(),
        benchmark
    );

    let result = RetentionMetrics::new()
        .compute(&series, benchmark)
        .context("Failed to compute retention metrics")?;
    let assessment = assess(&result, &config.assessment);

    tracing::info!(
        "Mean {:.2}, gap {:.2} ({}), volatility {}",
        result.mean,
        result.average_gap,
        assessment.gap_severity,
        assessment.volatility
    );

    let stdout = std::io::stdout();
    let reporter = if compact {
        JsonReporter::compact(stdout)
    } else {
        JsonReporter::new(stdout)
    };

    if table_only {
        reporter.write_table(&result.to_table())?;
    } else {
        reporter.write_report(&AnalysisReport::new(result, assessment))?;
    }

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = RetentionConfig::default();
    config
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<RetentionConfig> {
    match path {
        Some(p) => RetentionConfig::load(&p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => {
            let default_path = PathBuf::from("retention.toml");

            if default_path.exists() {
                RetentionConfig::load(&default_path)
                    .with_context(|| format!("Failed to load config {}", default_path.display()))
            } else {
                tracing::debug!("No retention.toml found, using built-in dataset");
                Ok(RetentionConfig::default())
            }
        }
    }
}
