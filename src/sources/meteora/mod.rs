mod types;

use crate::common::{Confidence, HttpSource, PriceScannerError, PriceSource, Quote, Source};
use crate::create_source;
use crate::tokens::{Token, USDC_MINT};
use async_trait::async_trait;
use std::collections::HashMap;
use types::{MeteoraGroupsResponse, MeteoraPair};

const METEORA_API_BASE: &str = "https://dlmm-api.meteora.ag";

create_source!(Meteora);

#[async_trait]
impl HttpSource for Meteora {
    fn api_base(&self) -> &str {
        METEORA_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn source_name(&self) -> &str {
        "Meteora"
    }
}

#[async_trait]
impl PriceSource for Meteora {
    fn source(&self) -> Source {
        Source::Meteora
    }

    async fn fetch_prices(&self, tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        let response: MeteoraGroupsResponse = self.get("pair/all_by_groups").await?;
        Ok(quotes_from_response(&response, tokens))
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        let response: MeteoraGroupsResponse = self
            .get("pair/all_by_groups")
            .await
            .map_err(|_| PriceScannerError::HealthCheckFailed)?;

        if response.groups.is_empty() {
            return Err(PriceScannerError::HealthCheckFailed);
        }
        Ok(())
    }
}

/// USD price of a registry token implied by a USDC-quoted pair, with the
/// pool's liquidity for ranking.
fn usdc_price(pair: &MeteoraPair, mint: &str) -> Option<(f64, f64)> {
    let price = pair.current_price.filter(|p| *p > 0.0)?;
    let liquidity = pair
        .liquidity
        .as_ref()
        .and_then(|l| l.value("liquidity").ok())
        .unwrap_or(0.0);

    if pair.mint_x == mint && pair.mint_y == USDC_MINT {
        Some((price, liquidity))
    } else if pair.mint_y == mint && pair.mint_x == USDC_MINT {
        Some((1.0 / price, liquidity))
    } else {
        None
    }
}

fn quotes_from_response(response: &MeteoraGroupsResponse, tokens: &[Token]) -> Vec<Quote> {
    // Deepest USDC pool wins when a token trades in several pairs
    let mut best: HashMap<&str, (f64, f64)> = HashMap::new();

    for pair in response.groups.iter().flat_map(|g| g.pairs.iter()) {
        for token in tokens {
            if token.mint == USDC_MINT {
                continue;
            }
            if let Some((price, liquidity)) = usdc_price(pair, &token.mint) {
                let entry = best.entry(token.symbol.as_str()).or_insert((price, liquidity));
                if liquidity > entry.1 {
                    *entry = (price, liquidity);
                }
            }
        }
    }

    tokens
        .iter()
        .filter_map(|token| {
            best.get(token.symbol.as_str()).map(|(price, _)| {
                Quote::new(Source::Meteora, token.symbol.clone(), *price)
                    .with_confidence(Confidence::Medium)
            })
        })
        .collect()
}
