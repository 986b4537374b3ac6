use crate::common::{Quote, Source};
use crate::scanner::TokenSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arbitrage opportunity - buy a token on the cheapest source and sell it on
/// the most expensive one
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArbitrageOpportunity {
    /// Token symbol (e.g., "SOL")
    pub token: String,
    /// Source quoting the lowest price
    pub buy_source: Source,
    pub buy_price: f64,
    /// Source quoting the highest price
    pub sell_source: Source,
    pub sell_price: f64,
    /// ((sell_price - buy_price) / buy_price) * 100, before fees
    pub spread_pct: f64,
}

impl ArbitrageOpportunity {
    /// Price difference per unit of token
    pub fn price_diff(&self) -> f64 {
        self.sell_price - self.buy_price
    }
}

/// Finds the best buy/sell pair per token and keeps those whose spread is at
/// least `min_spread_pct`, largest spread first.
///
/// Tokens with fewer than two quotes are skipped. Equal prices resolve to the
/// source that comes first in the snapshot, so the output is deterministic.
pub fn detect_arbitrage(
    snapshots: &BTreeMap<String, TokenSnapshot>,
    min_spread_pct: f64,
) -> Vec<ArbitrageOpportunity> {
    let threshold = min_spread_pct.max(0.0);
    let mut opportunities = Vec::new();

    for snapshot in snapshots.values() {
        if let Some(opportunity) = best_pair(snapshot) {
            if opportunity.spread_pct >= threshold {
                opportunities.push(opportunity);
            }
        }
    }

    // Stable sort: equal spreads keep token order
    opportunities.sort_by(|a, b| {
        b.spread_pct
            .partial_cmp(&a.spread_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    opportunities
}

fn best_pair(snapshot: &TokenSnapshot) -> Option<ArbitrageOpportunity> {
    if snapshot.quotes.len() < 2 {
        return None;
    }

    let mut buy = &snapshot.quotes[0];
    for quote in &snapshot.quotes[1..] {
        if quote.price < buy.price {
            buy = quote;
        }
    }

    // Sell leg must come from another source, even if the snapshot was built
    // by hand with repeated sources
    let mut sell: Option<&Quote> = None;
    for quote in snapshot.quotes.iter().filter(|q| q.source != buy.source) {
        if sell.is_none_or(|s| quote.price > s.price) {
            sell = Some(quote);
        }
    }
    let sell = sell?;

    // All prices equal: nothing to gain
    if sell.price <= buy.price {
        return None;
    }

    Some(ArbitrageOpportunity {
        token: snapshot.token.clone(),
        buy_source: buy.source.clone(),
        buy_price: buy.price,
        sell_source: sell.source.clone(),
        sell_price: sell.price,
        spread_pct: (sell.price - buy.price) / buy.price * 100.0,
    })
}
