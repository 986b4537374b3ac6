use anyhow::{Context, Result};
use clap::Parser;
use multi_dex_price_scanner::{
    JsonFileSink, LogSink, PriceScanner, PriceSource, ReportSink, RunOptions, ScannerConfig,
    Source, build_sources, run_scanner,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Multi-DEX price scanner for Solana tokens")]
struct Args {
    /// Path to a TOML config file (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between polling cycles
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Per-source fetch timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Minimum spread (percent) for an opportunity to be reported
    #[arg(long)]
    min_spread_pct: Option<f64>,

    /// Sources to poll (comma-separated, e.g. jupiter,raydium,orca)
    #[arg(long, value_delimiter = ',')]
    sources: Option<Vec<String>>,

    /// Where to write the latest cycle as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Do not write the JSON report
    #[arg(long, conflicts_with = "output")]
    no_output: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Probe every enabled source once and exit
    #[arg(long)]
    check: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args)?;
    let sources = build_sources(&config.sources, config.birdeye_api_key.as_deref())
        .context("build price sources")?;

    if args.check {
        return health_check(&sources).await;
    }

    let registry = config.registry().context("load token registry")?;
    let scanner = PriceScanner::new(sources, registry, config.timeout());

    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(LogSink::new())];
    if let Some(path) = &config.output_path {
        sinks.push(Box::new(JsonFileSink::new(path)));
    }

    let options = RunOptions {
        interval: config.interval(),
        min_spread_pct: config.min_spread_pct,
        max_cycles: config.max_cycles,
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler available; run until max_cycles
            std::future::pending::<()>().await;
        }
    };

    run_scanner(&scanner, &sinks, &options, shutdown).await;
    Ok(())
}

// Priority: CLI args > config file > defaults
fn load_config(args: &Args) -> Result<ScannerConfig> {
    let mut config = ScannerConfig::load(args.config.as_deref()).context("load config")?;

    if let Some(interval_ms) = args.interval_ms {
        config.interval_ms = interval_ms;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(min_spread_pct) = args.min_spread_pct {
        config.min_spread_pct = min_spread_pct;
    }
    if let Some(sources) = &args.sources {
        config.sources = sources
            .iter()
            .map(|s| Source::from(s.trim()))
            .collect();
    }
    if let Some(output) = &args.output {
        config.output_path = Some(output.clone());
    }
    if args.no_output {
        config.output_path = None;
    }
    if args.once {
        config.max_cycles = Some(1);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn health_check(sources: &[Box<dyn PriceSource>]) -> Result<()> {
    let results = futures::future::join_all(sources.iter().map(|s| s.health_check())).await;

    let mut failed = 0;
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(()) => info!(source = %source.source(), "healthy"),
            Err(e) => {
                failed += 1;
                warn!(source = %source.source(), error = %e, "unhealthy");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} sources failed the health check", failed, sources.len());
    }
    Ok(())
}
