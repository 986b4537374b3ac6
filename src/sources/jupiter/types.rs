use crate::common::FlexibleF64;
use serde::Deserialize;
use std::collections::HashMap;

/// GET /price?ids=<mint,...>
/// Unknown ids are either missing from `data` or mapped to null.
#[derive(Debug, Deserialize)]
pub struct JupiterPriceResponse {
    #[serde(default)]
    pub data: HashMap<String, Option<JupiterPrice>>,
}

#[derive(Debug, Deserialize)]
pub struct JupiterPrice {
    #[allow(dead_code)]
    pub id: Option<String>,
    #[allow(dead_code)]
    #[serde(rename = "mintSymbol")]
    pub mint_symbol: Option<String>,
    pub price: FlexibleF64,
}
