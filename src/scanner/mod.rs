use crate::common::{PriceScannerError, PriceSource, Quote};
use crate::tokens::TokenRegistry;
use chrono::Utc;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

mod opportunity;
mod stats;
mod types;
pub use opportunity::{ArbitrageOpportunity, detect_arbitrage};
pub use stats::{SourceDeviation, TokenStats, compute_all_stats, compute_stats};
pub use types::{CycleResult, SourceReport, SourceStatus, TokenSnapshot};

/// Price scanner - polls every configured source concurrently and groups the
/// results per token
pub struct PriceScanner {
    sources: Vec<Box<dyn PriceSource>>,
    registry: TokenRegistry,
    per_source_timeout: Duration,
}

impl PriceScanner {
    pub fn new(
        sources: Vec<Box<dyn PriceSource>>,
        registry: TokenRegistry,
        per_source_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            registry,
            per_source_timeout,
        }
    }

    pub fn sources(&self) -> &[Box<dyn PriceSource>] {
        &self.sources
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn per_source_timeout(&self) -> Duration {
        self.per_source_timeout
    }

    /// Runs one polling cycle. See [`poll_once`].
    pub async fn poll_once(&self) -> CycleResult {
        poll_once(&self.sources, &self.registry, self.per_source_timeout).await
    }
}

/// Fetches from every source in parallel and builds one snapshot per
/// registry token.
///
/// Never fails: a source that errors or exceeds `per_source_timeout`
/// contributes nothing and is recorded in [`CycleResult::sources`]. Wall-clock
/// time is bounded by the timeout, not by the number of sources.
pub async fn poll_once(
    sources: &[Box<dyn PriceSource>],
    registry: &TokenRegistry,
    per_source_timeout: Duration,
) -> CycleResult {
    let started_at = Utc::now();
    let started = Instant::now();

    let futures: Vec<_> = sources
        .iter()
        .map(|source| source.fetch(registry.tokens(), per_source_timeout))
        .collect();
    let results = join_all(futures).await;

    let mut snapshots: BTreeMap<String, TokenSnapshot> = registry
        .symbols()
        .map(|symbol| (symbol.to_string(), TokenSnapshot::empty(symbol)))
        .collect();
    let mut reports = Vec::with_capacity(sources.len());
    let mut dropped_quotes = 0;

    for (source, result) in sources.iter().zip(results) {
        let source = source.source();
        let status = match result {
            Ok(quotes) => {
                let (accepted, dropped) = merge_quotes(&mut snapshots, quotes);
                dropped_quotes += dropped;
                debug!(%source, accepted, dropped, "source fetched");
                SourceStatus::Ok { accepted, dropped }
            }
            Err(PriceScannerError::Timeout { timeout, .. }) => {
                warn!(%source, ?timeout, "source timed out");
                SourceStatus::TimedOut
            }
            Err(e) => {
                warn!(%source, error = %e, "source failed");
                SourceStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        reports.push(SourceReport { source, status });
    }

    apply_pegs(&mut snapshots, registry);

    let result = CycleResult {
        started_at,
        elapsed: started.elapsed(),
        snapshots,
        sources: reports,
        dropped_quotes,
    };

    info!(
        sources_ok = result.successful_sources(),
        sources_failed = result.failed_sources(),
        quotes = result.total_quotes(),
        dropped = result.dropped_quotes,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "poll cycle complete"
    );

    result
}

/// Validates and groups one source's quotes. Returns (accepted, dropped).
fn merge_quotes(
    snapshots: &mut BTreeMap<String, TokenSnapshot>,
    quotes: Vec<Quote>,
) -> (usize, usize) {
    let mut accepted = 0;
    let mut dropped = 0;

    for quote in quotes {
        if !quote.has_valid_price() {
            debug!(source = %quote.source, token = %quote.token, price = quote.price, "dropping quote with invalid price");
            dropped += 1;
            continue;
        }

        // Snapshots are pre-seeded from the registry, so a miss is an unknown token
        let Some(snapshot) = snapshots.get_mut(&quote.token) else {
            debug!(source = %quote.source, token = %quote.token, "dropping quote for unknown token");
            dropped += 1;
            continue;
        };

        if snapshot.insert_first(quote) {
            accepted += 1;
        } else {
            dropped += 1;
        }
    }

    (accepted, dropped)
}

fn apply_pegs(snapshots: &mut BTreeMap<String, TokenSnapshot>, registry: &TokenRegistry) {
    for token in registry.tokens() {
        let Some(peg) = token.peg else { continue };
        if let Some(snapshot) = snapshots.get_mut(&token.symbol) {
            snapshot.quotes = snapshot.quotes.iter().map(|q| q.with_price(peg)).collect();
        }
    }
}
