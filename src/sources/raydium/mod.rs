mod types;

use crate::common::{Confidence, HttpSource, PriceScannerError, PriceSource, Quote, Source};
use crate::create_source;
use crate::tokens::Token;
use async_trait::async_trait;
use types::RaydiumPriceResponse;

const RAYDIUM_API_BASE: &str = "https://api.raydium.io/v2";

create_source!(Raydium);

#[async_trait]
impl HttpSource for Raydium {
    fn api_base(&self) -> &str {
        RAYDIUM_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn source_name(&self) -> &str {
        "Raydium"
    }
}

#[async_trait]
impl PriceSource for Raydium {
    fn source(&self) -> Source {
        Source::Raydium
    }

    async fn fetch_prices(&self, tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        // The endpoint takes no filter; the whole map comes back every time
        let response: RaydiumPriceResponse = self.get("main/price").await?;
        quotes_from_response(&response, tokens)
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        let response: RaydiumPriceResponse = self
            .get("main/price")
            .await
            .map_err(|_| PriceScannerError::HealthCheckFailed)?;

        if response.is_empty() {
            return Err(PriceScannerError::HealthCheckFailed);
        }
        Ok(())
    }
}

fn quotes_from_response(
    response: &RaydiumPriceResponse,
    tokens: &[Token],
) -> Result<Vec<Quote>, PriceScannerError> {
    let mut quotes = Vec::new();

    for token in tokens {
        if let Some(price) = response.get(&token.mint) {
            let price = price.value("Raydium price")?;
            quotes.push(
                Quote::new(Source::Raydium, token.symbol.clone(), price)
                    .with_confidence(Confidence::High),
            );
        }
    }

    Ok(quotes)
}
