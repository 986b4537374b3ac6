// src/common/utils.rs
use crate::common::PriceScannerError;
use serde::Deserialize;

/// Numeric field that some APIs send as a JSON number and others as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexibleF64 {
    Number(f64),
    Text(String),
}

impl FlexibleF64 {
    pub fn value(&self, field_name: &str) -> Result<f64, PriceScannerError> {
        match self {
            FlexibleF64::Number(n) => Ok(*n),
            FlexibleF64::Text(s) => parse_f64(s, field_name),
        }
    }
}

// Parse a string to a f64, return a PriceScannerError if the parsing fails
pub fn parse_f64(value: &str, field_name: &str) -> Result<f64, PriceScannerError> {
    value
        .parse::<f64>()
        .map_err(|_| PriceScannerError::ApiError(format!("Invalid {} format", field_name)))
}

// Relative difference of `value` against `base`, in percent
pub fn percent_diff(value: f64, base: f64) -> f64 {
    (value - base) / base * 100.0
}

// A price the core is willing to aggregate
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}
