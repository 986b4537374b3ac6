use crate::common::FlexibleF64;
use serde::Deserialize;

/// GET /v1/token/list
#[derive(Debug, Deserialize)]
pub struct OrcaTokenListResponse {
    #[serde(default)]
    pub tokens: Vec<OrcaToken>,
}

#[derive(Debug, Deserialize)]
pub struct OrcaToken {
    pub mint: Option<String>,
    #[allow(dead_code)]
    pub symbol: Option<String>,
    #[serde(rename = "usdPrice")]
    pub usd_price: Option<FlexibleF64>,
}
