use serde::Deserialize;
use std::collections::HashMap;

/// GET /public/multi_price?list_address=<mint,...>
#[derive(Debug, Deserialize)]
pub struct BirdeyeMultiPriceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<HashMap<String, Option<BirdeyePrice>>>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BirdeyePrice {
    #[serde(default)]
    pub value: f64,
    #[allow(dead_code)]
    #[serde(rename = "updateUnixTime")]
    pub update_unix_time: Option<i64>,
}
