pub mod birdeye;
pub mod jupiter;
pub mod meteora;
pub mod orca;
pub mod raydium;

// Re-export
pub use birdeye::Birdeye;
pub use jupiter::Jupiter;
pub use meteora::Meteora;
pub use orca::Orca;
pub use raydium::Raydium;

use crate::common::{PriceScannerError, PriceSource, Source};

/// Instantiates the fetcher for every listed source, in the given order.
/// Fetch order is what breaks ties when two fetchers report the same source.
pub fn build_sources(
    sources: &[Source],
    birdeye_api_key: Option<&str>,
) -> Result<Vec<Box<dyn PriceSource>>, PriceScannerError> {
    sources
        .iter()
        .map(|source| -> Result<Box<dyn PriceSource>, PriceScannerError> {
            match source {
                Source::Jupiter => Ok(Box::new(Jupiter::new())),
                Source::Raydium => Ok(Box::new(Raydium::new())),
                Source::Orca => Ok(Box::new(Orca::new())),
                Source::Birdeye => Ok(Box::new(Birdeye::new(
                    birdeye_api_key.map(str::to_string),
                ))),
                Source::Meteora => Ok(Box::new(Meteora::new())),
                Source::Custom(name) => Err(PriceScannerError::Config(format!(
                    "No built-in fetcher for source '{}'",
                    name
                ))),
            }
        })
        .collect()
}
