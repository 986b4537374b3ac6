use crate::common::FlexibleF64;
use serde::Deserialize;

/// GET /pair/all_by_groups
#[derive(Debug, Deserialize)]
pub struct MeteoraGroupsResponse {
    #[serde(default)]
    pub groups: Vec<MeteoraGroup>,
}

#[derive(Debug, Deserialize)]
pub struct MeteoraGroup {
    #[allow(dead_code)]
    pub name: Option<String>,
    #[serde(default)]
    pub pairs: Vec<MeteoraPair>,
}

/// A DLMM pair. `current_price` is the price of X expressed in Y.
#[derive(Debug, Deserialize)]
pub struct MeteoraPair {
    #[allow(dead_code)]
    pub address: Option<String>,
    pub mint_x: String,
    pub mint_y: String,
    pub current_price: Option<f64>,
    pub liquidity: Option<FlexibleF64>,
}
