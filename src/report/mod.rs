//! Per-cycle output: the exported report record and the sinks that consume it.

mod console;
mod json_file;

pub use console::LogSink;
pub use json_file::JsonFileSink;

use crate::common::{Confidence, PriceScannerError, Source};
use crate::scanner::{ArbitrageOpportunity, CycleResult, SourceReport, TokenStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quote fields carried into the export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRecord {
    pub source: Source,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

/// Everything a sink receives once per cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    pub timestamp: DateTime<Utc>,
    pub formatted_time: String,
    pub elapsed_ms: u64,
    pub prices: BTreeMap<String, Vec<QuoteRecord>>,
    /// `None` for tokens nobody quoted this cycle
    pub stats: BTreeMap<String, Option<TokenStats>>,
    pub arbitrage_opportunities: Vec<ArbitrageOpportunity>,
    pub sources: Vec<SourceReport>,
    pub dropped_quotes: usize,
}

impl CycleReport {
    pub fn new(
        cycle: u64,
        result: &CycleResult,
        stats: BTreeMap<String, Option<TokenStats>>,
        arbitrage_opportunities: Vec<ArbitrageOpportunity>,
    ) -> Self {
        let prices = result
            .snapshots
            .iter()
            .map(|(token, snapshot)| {
                let records = snapshot
                    .quotes
                    .iter()
                    .map(|q| QuoteRecord {
                        source: q.source.clone(),
                        price: q.price,
                        observed_at: q.observed_at,
                        confidence: q.confidence,
                    })
                    .collect();
                (token.clone(), records)
            })
            .collect();

        Self {
            cycle,
            timestamp: result.started_at,
            formatted_time: result
                .started_at
                .format("%Y-%m-%d %H:%M:%S%.3f")
                .to_string(),
            elapsed_ms: result.elapsed.as_millis() as u64,
            prices,
            stats,
            arbitrage_opportunities,
            sources: result.sources.clone(),
            dropped_quotes: result.dropped_quotes,
        }
    }
}

/// Consumer of cycle reports (console, file, ...). A failing sink never stops
/// the scanner; the error is logged and the next sink still runs.
#[async_trait]
pub trait ReportSink: Send + Sync {
    fn name(&self) -> &str;

    async fn publish(&self, report: &CycleReport) -> Result<(), PriceScannerError>;
}
