use async_trait::async_trait;
use multi_dex_price_scanner::{
    Confidence, PriceScannerError, PriceSource, Quote, Source, Token, TokenRegistry,
};
use std::time::Duration;

// Allow dead code warnings since different test files use different items from this module
#[allow(dead_code)]
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Registry used by the offline tests: two free-floating tokens and one pegged stablecoin
#[allow(dead_code)]
pub fn test_registry() -> TokenRegistry {
    TokenRegistry::new(vec![
        Token::create("SOL", SOL_MINT),
        Token::create("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"),
        Token::pegged("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 1.0),
    ])
    .expect("valid test registry")
}

/// Returns a fixed list of (token, price) quotes, optionally after a delay
pub struct StaticSource {
    pub source: Source,
    pub prices: Vec<(&'static str, f64)>,
    pub delay: Option<Duration>,
}

#[allow(dead_code)]
impl StaticSource {
    pub fn new(source: Source, prices: Vec<(&'static str, f64)>) -> Self {
        Self {
            source,
            prices,
            delay: None,
        }
    }

    pub fn boxed(source: Source, prices: Vec<(&'static str, f64)>) -> Box<dyn PriceSource> {
        Box::new(Self::new(source, prices))
    }

    /// Never answers within any reasonable test timeout
    pub fn hanging(source: Source) -> Box<dyn PriceSource> {
        Box::new(Self {
            source,
            prices: vec![("SOL", 1.0)],
            delay: Some(Duration::from_secs(30)),
        })
    }
}

#[async_trait]
impl PriceSource for StaticSource {
    fn source(&self) -> Source {
        self.source.clone()
    }

    async fn fetch_prices(&self, _tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .prices
            .iter()
            .map(|(token, price)| {
                Quote::new(self.source.clone(), *token, *price).with_confidence(Confidence::High)
            })
            .collect())
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        Ok(())
    }
}

/// Always fails the way a broken API would
pub struct FailingSource {
    pub source: Source,
}

#[allow(dead_code)]
impl FailingSource {
    pub fn boxed(source: Source) -> Box<dyn PriceSource> {
        Box::new(Self { source })
    }
}

#[async_trait]
impl PriceSource for FailingSource {
    fn source(&self) -> Source {
        self.source.clone()
    }

    async fn fetch_prices(&self, _tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError> {
        Err(PriceScannerError::ApiError(format!(
            "{} API error: 503 Service Unavailable",
            self.source
        )))
    }

    async fn health_check(&self) -> Result<(), PriceScannerError> {
        Err(PriceScannerError::HealthCheckFailed)
    }
}
