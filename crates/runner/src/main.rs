use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sentinel_clock::SystemClock;
use sentinel_indicators::{DEFAULT_HORIZON, DEFAULT_THRESHOLD};
use sentinel_runner::{ExportOptions, Pipeline, SentinelConfig, export_features, shutdown_channel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "sentinel", version, about = "Streaming price signal pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the configured source and emit a signal every cycle
    Run(RunArgs),
    /// Compute labelled training features from a JSON-lines price file
    ExportFeatures(ExportArgs),
}

#[derive(Args)]
struct RunArgs {
    /// JSON config file (defaults apply when omitted)
    #[arg(long, env = "SENTINEL_CONFIG")]
    config: Option<PathBuf>,
    /// Override the classifier artifact path
    #[arg(long, env = "SENTINEL_MODEL")]
    model: Option<PathBuf>,
    /// Override the history buffer capacity
    #[arg(long)]
    capacity: Option<usize>,
    /// Stop after this many cycles
    #[arg(long)]
    max_cycles: Option<u64>,
}

#[derive(Args)]
struct ExportArgs {
    /// JSON-lines file of {"timestamp", "price"} samples
    #[arg(long)]
    input: PathBuf,
    /// Where to write the feature rows
    #[arg(long)]
    output: PathBuf,
    /// Config file whose buffer and indicator settings to use
    #[arg(long, env = "SENTINEL_CONFIG")]
    config: Option<PathBuf>,
    /// Override the buffer capacity
    #[arg(long)]
    capacity: Option<usize>,
    /// Samples ahead used for the target
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: usize,
    /// Forward return above which the target is 1
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let mut filter = EnvFilter::from_default_env();
    for target in ["sentinel", "sentinel_runner", "sentinel_gateway", "sentinel_model"] {
        filter = filter.add_directive(format!("{}=info", target).parse()?);
    }
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::ExportFeatures(args) => export(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SentinelConfig> {
    match path {
        Some(path) => SentinelConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SentinelConfig::default()),
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(model) = args.model {
        config.model_path = model;
    }
    if let Some(capacity) = args.capacity {
        config.buffer.capacity = capacity;
    }
    if args.max_cycles.is_some() {
        config.max_cycles = args.max_cycles;
    }

    tracing::info!(
        "Starting sentinel: {} source, model {}",
        config.source.kind(),
        config.model_path.display()
    );

    let pipeline = Pipeline::build(&config, Arc::new(SystemClock::new()))
        .await
        .context("building pipeline")?;

    let (trigger, shutdown) = shutdown_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping after the current cycle");
            trigger.trigger();
        }
    });

    let stats = pipeline.run(shutdown).await.context("ingestion loop failed")?;
    tracing::info!("Done: {:?}", stats);
    Ok(())
}

fn export(args: ExportArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let options = ExportOptions {
        capacity: args.capacity.unwrap_or(config.buffer.capacity),
        horizon: args.horizon,
        threshold: args.threshold,
        indicators: config.indicators,
    };

    let summary = export_features(&args.input, &args.output, &options)
        .with_context(|| format!("exporting features from {}", args.input.display()))?;
    tracing::info!(
        "{} rows written ({} samples read, {} skipped)",
        summary.rows_written,
        summary.samples,
        summary.skipped
    );
    Ok(())
}
