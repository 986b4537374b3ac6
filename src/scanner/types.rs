use crate::common::{Quote, Source};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Quotes collected for one token in one cycle, at most one per source,
/// in fetch order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenSnapshot {
    pub token: String,
    pub quotes: Vec<Quote>,
}

impl TokenSnapshot {
    pub fn empty(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            quotes: Vec::new(),
        }
    }

    pub fn with_quotes(token: impl Into<String>, quotes: Vec<Quote>) -> Self {
        Self {
            token: token.into(),
            quotes,
        }
    }

    /// Adds the quote unless this source already contributed one.
    /// Returns whether it was kept.
    pub fn insert_first(&mut self, quote: Quote) -> bool {
        if self.quotes.iter().any(|q| q.source == quote.source) {
            return false;
        }
        self.quotes.push(quote);
        true
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.quotes.iter().map(|q| q.price)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Outcome of one source's fetch in a cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok { accepted: usize, dropped: usize },
    TimedOut,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceReport {
    pub source: Source,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, SourceStatus::Ok { .. })
    }
}

/// Everything one `poll_once` produced. Immutable once returned.
#[derive(Debug, Clone)]
pub struct CycleResult {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// One entry per registry token, including tokens nobody quoted
    pub snapshots: BTreeMap<String, TokenSnapshot>,
    pub sources: Vec<SourceReport>,
    /// Quotes rejected by validation or de-duplication, across all sources
    pub dropped_quotes: usize,
}

impl CycleResult {
    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| !s.is_ok()).count()
    }

    pub fn successful_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_ok()).count()
    }

    pub fn total_quotes(&self) -> usize {
        self.snapshots.values().map(TokenSnapshot::len).sum()
    }
}
