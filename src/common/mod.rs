pub mod client;
pub mod errors;
pub mod quote;
pub mod source;
pub mod utils;

// Re-export
pub use client::create_http_client;
pub use errors::PriceScannerError;
pub use quote::{Confidence, Quote};
pub use source::{HttpSource, PriceSource, Source};
pub use utils::{FlexibleF64, is_valid_price, parse_f64, percent_diff};
