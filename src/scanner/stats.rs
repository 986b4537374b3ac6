use crate::common::{Source, percent_diff};
use crate::scanner::TokenSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One source's distance from the cross-source average
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDeviation {
    pub source: Source,
    pub price: f64,
    /// (price - avg) / avg * 100
    pub deviation_pct: f64,
}

/// Cross-source price statistics for one token in one cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenStats {
    pub token: String,
    pub quote_count: usize,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Source quoting `min`, first in fetch order on ties
    pub min_source: Source,
    /// Source quoting `max`, first in fetch order on ties
    pub max_source: Source,
    /// (max - min) / avg * 100
    pub spread_pct: f64,
    /// In snapshot order
    pub deviations: Vec<SourceDeviation>,
}

/// Returns `None` when the snapshot has no quotes ("no data").
pub fn compute_stats(snapshot: &TokenSnapshot) -> Option<TokenStats> {
    let first = snapshot.quotes.first()?;

    let mut min_quote = first;
    let mut max_quote = first;
    let mut sum = 0.0;
    for quote in &snapshot.quotes {
        if quote.price < min_quote.price {
            min_quote = quote;
        }
        if quote.price > max_quote.price {
            max_quote = quote;
        }
        sum += quote.price;
    }

    let min = min_quote.price;
    let max = max_quote.price;
    // Summation rounding can land the mean just outside [min, max]
    let avg = (sum / snapshot.quotes.len() as f64).clamp(min, max);

    let deviations = snapshot
        .quotes
        .iter()
        .map(|q| SourceDeviation {
            source: q.source.clone(),
            price: q.price,
            deviation_pct: percent_diff(q.price, avg),
        })
        .collect();

    Some(TokenStats {
        token: snapshot.token.clone(),
        quote_count: snapshot.quotes.len(),
        avg,
        min,
        max,
        min_source: min_quote.source.clone(),
        max_source: max_quote.source.clone(),
        spread_pct: (max - min) / avg * 100.0,
        deviations,
    })
}

pub fn compute_all_stats(
    snapshots: &BTreeMap<String, TokenSnapshot>,
) -> BTreeMap<String, Option<TokenStats>> {
    snapshots
        .iter()
        .map(|(token, snapshot)| (token.clone(), compute_stats(snapshot)))
        .collect()
}
