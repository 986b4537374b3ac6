//! Scanner configuration: TOML file, `.env` and environment, then CLI
//! overrides applied by the binary.

use crate::common::{PriceScannerError, Source};
use crate::tokens::{Token, TokenRegistry, default_solana_tokens};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BIRDEYE_API_KEY_ENV: &str = "BIRDEYE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Pause between the end of one cycle and the start of the next
    pub interval_ms: u64,
    /// Deadline for each source's fetch
    pub timeout_ms: u64,
    /// Minimum spread, in percent, for an opportunity to be reported
    pub min_spread_pct: f64,
    /// Stop after this many cycles; run until interrupted when unset
    pub max_cycles: Option<u64>,
    pub sources: Vec<Source>,
    pub birdeye_api_key: Option<String>,
    /// JSON export of the latest cycle; disabled when unset
    pub output_path: Option<PathBuf>,
    pub tokens: Vec<Token>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            timeout_ms: 3_000,
            min_spread_pct: 0.3,
            max_cycles: None,
            sources: Source::builtin(),
            birdeye_api_key: None,
            output_path: Some(PathBuf::from("multi_dex_prices.json")),
            tokens: default_solana_tokens(),
        }
    }
}

impl ScannerConfig {
    /// Reads `path` when given (defaults otherwise), then fills the Birdeye
    /// key from the environment if the file left it out.
    ///
    /// Not validated: callers apply their overrides first, then call
    /// [`ScannerConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, PriceScannerError> {
        let _ = dotenvy::dotenv();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if config.birdeye_api_key.is_none() {
            config.birdeye_api_key = std::env::var(BIRDEYE_API_KEY_ENV)
                .ok()
                .filter(|k| !k.is_empty());
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, PriceScannerError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, PriceScannerError> {
        toml::from_str(raw).map_err(|e| PriceScannerError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), PriceScannerError> {
        if !self.min_spread_pct.is_finite() || self.min_spread_pct < 0.0 {
            return Err(PriceScannerError::Config(format!(
                "min_spread_pct must be a non-negative number, got {}",
                self.min_spread_pct
            )));
        }
        if self.interval_ms == 0 {
            return Err(PriceScannerError::Config(
                "interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(PriceScannerError::Config(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.sources.is_empty() {
            return Err(PriceScannerError::Config(
                "at least one source must be enabled".to_string(),
            ));
        }
        if self.max_cycles == Some(0) {
            return Err(PriceScannerError::Config(
                "max_cycles must be greater than zero when set".to_string(),
            ));
        }
        self.registry()?;
        Ok(())
    }

    pub fn registry(&self) -> Result<TokenRegistry, PriceScannerError> {
        TokenRegistry::new(self.tokens.clone())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
