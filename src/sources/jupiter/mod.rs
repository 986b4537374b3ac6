mod types;

use crate::common::{Confidence, HttpSource, PriceScannerError, PriceSource, Quote, Source};
use crate::create_source;
use crate::tokens::{SOL_MINT, Token, mint_list};
use async_trait::async_trait;
use types::JupiterPriceResponse;

const JUPITER_API_BASE: &str = "https://price.jup.ag/v6";

create_source!(Jupiter);

#[async_trait]
impl HttpSource for Jupiter {
    fn api_base(&self) -> &str {
        JUPITER_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn source_name(&self) -> &str {
        "Jupiter"
    }
}

#[async_trait]
impl PriceSource for Jupiter {
    fn source(&self) -> Source {
        Source::Jupiter
    }

    async fn fetch_prices(&self, tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = format!("price?ids={}", mint_list(tokens));
        let response: JupiterPriceResponse = self.get(&endpoint).await?;

        quotes_from_response(&response, tokens)
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        let endpoint = format!("price?ids={}", SOL_MINT);
        let response: JupiterPriceResponse = self
            .get(&endpoint)
            .await
            .map_err(|_| PriceScannerError::HealthCheckFailed)?;

        if response.data.is_empty() {
            return Err(PriceScannerError::HealthCheckFailed);
        }
        Ok(())
    }
}

fn quotes_from_response(
    response: &JupiterPriceResponse,
    tokens: &[Token],
) -> Result<Vec<Quote>, PriceScannerError> {
    let mut quotes = Vec::new();

    for token in tokens {
        let Some(Some(entry)) = response.data.get(&token.mint) else {
            continue;
        };
        let price = entry.price.value("Jupiter price")?;
        quotes.push(
            Quote::new(Source::Jupiter, token.symbol.clone(), price)
                .with_confidence(Confidence::High),
        );
    }

    Ok(quotes)
}
