//! Polling loop: one cycle at a time, never overlapping.

use crate::report::{CycleReport, ReportSink};
use crate::scanner::{PriceScanner, compute_all_stats, detect_arbitrage};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub interval: Duration,
    pub min_spread_pct: f64,
    pub max_cycles: Option<u64>,
}

/// Polls once, derives stats and opportunities, and hands the report to
/// every sink.
pub async fn run_cycle(
    scanner: &PriceScanner,
    sinks: &[Box<dyn ReportSink>],
    cycle: u64,
    min_spread_pct: f64,
) -> CycleReport {
    let result = scanner.poll_once().await;
    let stats = compute_all_stats(&result.snapshots);
    let opportunities = detect_arbitrage(&result.snapshots, min_spread_pct);
    let report = CycleReport::new(cycle, &result, stats, opportunities);

    for sink in sinks {
        if let Err(e) = sink.publish(&report).await {
            warn!(sink = sink.name(), error = %e, "sink failed");
        }
    }

    report
}

/// Runs cycles until `shutdown` resolves or `max_cycles` is reached.
/// Returns the number of completed cycles.
///
/// The interval is measured from the end of one cycle to the start of the
/// next, so a slow cycle delays the schedule instead of overlapping it.
pub async fn run_scanner<F>(
    scanner: &PriceScanner,
    sinks: &[Box<dyn ReportSink>],
    options: &RunOptions,
    shutdown: F,
) -> u64
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut completed = 0u64;

    info!(
        tokens = scanner.registry().len(),
        sources = scanner.sources().len(),
        interval_ms = options.interval.as_millis() as u64,
        min_spread_pct = options.min_spread_pct,
        "starting price scanner"
    );

    loop {
        let cycle = completed + 1;
        tokio::select! {
            _ = &mut shutdown => {
                info!(cycle, "shutdown requested during cycle");
                break;
            }
            report = run_cycle(scanner, sinks, cycle, options.min_spread_pct) => {
                completed = cycle;
                info!(
                    cycle,
                    opportunities = report.arbitrage_opportunities.len(),
                    "cycle finished"
                );
            }
        }

        if options.max_cycles.is_some_and(|max| completed >= max) {
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            _ = tokio::time::sleep(options.interval) => {}
        }
    }

    info!(cycles = completed, "price scanner stopped");
    completed
}
