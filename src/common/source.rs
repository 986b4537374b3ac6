use crate::common::{PriceScannerError, Quote};
use crate::tokens::Token;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Identifier of a price-providing API. Known venues have their own variant;
/// anything else is carried by name.
///
/// Identity is the name: `Custom("Orca")` and `Orca` are the same source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Jupiter,
    Raydium,
    Orca,
    Birdeye,
    Meteora,
    Custom(String),
}

impl Source {
    pub fn name(&self) -> &str {
        match self {
            Source::Jupiter => "Jupiter",
            Source::Raydium => "Raydium",
            Source::Orca => "Orca",
            Source::Birdeye => "Birdeye",
            Source::Meteora => "Meteora",
            Source::Custom(name) => name,
        }
    }

    /// Every source with a built-in fetcher
    pub fn builtin() -> Vec<Source> {
        vec![
            Source::Jupiter,
            Source::Raydium,
            Source::Orca,
            Source::Birdeye,
            Source::Meteora,
        ]
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Source {}

impl Hash for Source {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl PartialOrd for Source {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Source {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "jupiter" => Source::Jupiter,
            "raydium" => Source::Raydium,
            "orca" => Source::Orca,
            "birdeye" => Source::Birdeye,
            "meteora" => Source::Meteora,
            _ => Source::Custom(value),
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::from(value.to_string())
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        value.name().to_string()
    }
}

// Common HTTP plumbing for sources backed by a REST endpoint
#[async_trait]
pub trait HttpSource: Send + Sync {
    fn api_base(&self) -> &str;
    fn client(&self) -> &reqwest::Client;
    fn source_name(&self) -> &str;

    /// Hook for sources that need extra headers (API keys etc.)
    fn prepare(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
    }

    async fn get<T: for<'de> serde::Deserialize<'de>>(
        &self,
        endpoint: &str,
    ) -> Result<T, PriceScannerError> {
        let url = format!("{}/{}", self.api_base(), endpoint);
        let response = self.prepare(self.client().get(&url)).send().await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PriceScannerError::ApiError(format!(
                "{} API error: {} - {}",
                self.source_name(),
                status,
                error_text
            )));
        }

        Ok(response.json().await?)
    }
}

/// A price source: one implementation per API, all with the same contract.
///
/// `fetch_prices` returns only the tokens the source has data for. Any
/// transport or payload failure is returned as an error for this source alone.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn source(&self) -> Source;

    async fn fetch_prices(&self, tokens: &[Token]) -> Result<Vec<Quote>, PriceScannerError>;

    async fn health_check(&self) -> Result<(), PriceScannerError>;

    /// `fetch_prices` under a hard deadline. On expiry the in-flight request
    /// is dropped and nothing is returned (all-or-nothing per call).
    async fn fetch(
        &self,
        tokens: &[Token],
        timeout: Duration,
    ) -> Result<Vec<Quote>, PriceScannerError> {
        match tokio::time::timeout(timeout, self.fetch_prices(tokens)).await {
            Ok(result) => result,
            Err(_) => Err(PriceScannerError::Timeout {
                source_name: self.source().to_string(),
                timeout,
            }),
        }
    }
}

#[macro_export]
macro_rules! create_source {
    (
        $struct_name:ident
    ) => {
        pub struct $struct_name {
            client: reqwest::Client,
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self {
                    client: $crate::common::create_http_client(),
                }
            }
        }

        impl Default for $struct_name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
