use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub symbol: String,
    pub mint: String,
    /// Fixed USD price every quote for this token is rewritten to (stablecoins)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peg: Option<f64>,
}

impl Token {
    pub fn new(symbol: String, mint: String, peg: Option<f64>) -> Self {
        Self { symbol, mint, peg }
    }

    /// Creates a token generically with provided parameters
    pub fn create(symbol: &str, mint: &str) -> Self {
        Self::new(symbol.to_string(), mint.to_string(), None)
    }

    pub fn pegged(symbol: &str, mint: &str, peg: f64) -> Self {
        Self::new(symbol.to_string(), mint.to_string(), Some(peg))
    }
}
