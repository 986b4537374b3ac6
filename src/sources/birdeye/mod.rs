mod types;

use crate::common::{
    Confidence, HttpSource, PriceScannerError, PriceSource, Quote, Source, create_http_client,
};
use crate::tokens::{SOL_MINT, Token, mint_list};
use async_trait::async_trait;
use types::BirdeyeMultiPriceResponse;

const BIRDEYE_API_BASE: &str = "https://public-api.birdeye.so";
const PUBLIC_API_KEY: &str = "public";

pub struct Birdeye {
    client: reqwest::Client,
    api_key: String,
}

impl Birdeye {
    /// Without a key the shared public tier is used (tight rate limits).
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: create_http_client(),
            api_key: api_key
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| PUBLIC_API_KEY.to_string()),
        }
    }
}

impl Default for Birdeye {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl HttpSource for Birdeye {
    fn api_base(&self) -> &str {
        BIRDEYE_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn source_name(&self) -> &str {
        "Birdeye"
    }

    fn prepare(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("X-API-KEY", &self.api_key)
    }
}

#[async_trait]
impl PriceSource for Birdeye {
    fn source(&self) -> Source {
        Source::Birdeye
    }

    async fn fetch_prices(&self, tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = format!("public/multi_price?list_address={}", mint_list(tokens));
        let response: BirdeyeMultiPriceResponse = self.get(&endpoint).await?;

        quotes_from_response(&response, tokens)
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        let endpoint = format!("public/multi_price?list_address={}", SOL_MINT);
        let response: BirdeyeMultiPriceResponse = self
            .get(&endpoint)
            .await
            .map_err(|_| PriceScannerError::HealthCheckFailed)?;

        if !response.success {
            return Err(PriceScannerError::HealthCheckFailed);
        }
        Ok(())
    }
}

fn quotes_from_response(
    response: &BirdeyeMultiPriceResponse,
    tokens: &[Token],
) -> Result<Vec<Quote>, PriceScannerError> {
    // Birdeye answers 200 with success=false on key/rate-limit problems
    if !response.success {
        return Err(PriceScannerError::ApiError(format!(
            "Birdeye API error: {}",
            response.message.as_deref().unwrap_or("request not successful")
        )));
    }

    let Some(data) = &response.data else {
        return Err(PriceScannerError::ApiError(
            "Birdeye API returned empty data".to_string(),
        ));
    };

    let mut quotes = Vec::new();
    for token in tokens {
        if let Some(Some(entry)) = data.get(&token.mint) {
            // A zero value means Birdeye has no price for the mint
            if entry.value == 0.0 {
                continue;
            }
            quotes.push(
                Quote::new(Source::Birdeye, token.symbol.clone(), entry.value)
                    .with_confidence(Confidence::High),
            );
        }
    }

    Ok(quotes)
}
