mod types;

use crate::common::{Confidence, HttpSource, PriceScannerError, PriceSource, Quote, Source};
use crate::create_source;
use crate::tokens::Token;
use async_trait::async_trait;
use std::collections::HashMap;
use types::OrcaTokenListResponse;

const ORCA_API_BASE: &str = "https://api.mainnet.orca.so/v1";

create_source!(Orca);

#[async_trait]
impl HttpSource for Orca {
    fn api_base(&self) -> &str {
        ORCA_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn source_name(&self) -> &str {
        "Orca"
    }
}

#[async_trait]
impl PriceSource for Orca {
    fn source(&self) -> Source {
        Source::Orca
    }

    async fn fetch_prices(&self, tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        let response: OrcaTokenListResponse = self.get("token/list").await?;
        Ok(quotes_from_response(&response, tokens))
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        let response: OrcaTokenListResponse = self
            .get("token/list")
            .await
            .map_err(|_| PriceScannerError::HealthCheckFailed)?;

        if response.tokens.is_empty() {
            return Err(PriceScannerError::HealthCheckFailed);
        }
        Ok(())
    }
}

fn quotes_from_response(response: &OrcaTokenListResponse, tokens: &[Token]) -> Vec<Quote> {
    // Tokens without a usd price (null, zero or unparseable) are listed but
    // not priced; the list covers far more than the registry
    let prices: HashMap<&str, f64> = response
        .tokens
        .iter()
        .filter_map(|t| {
            let mint = t.mint.as_deref()?;
            let price = t.usd_price.as_ref()?.value("Orca usdPrice").ok()?;
            (price != 0.0).then_some((mint, price))
        })
        .collect();

    tokens
        .iter()
        .filter_map(|token| {
            prices.get(token.mint.as_str()).map(|price| {
                Quote::new(Source::Orca, token.symbol.clone(), *price)
                    .with_confidence(Confidence::High)
            })
        })
        .collect()
}
