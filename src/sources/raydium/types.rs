use crate::common::FlexibleF64;
use std::collections::HashMap;

/// GET /main/price: a flat `{ "<mint>": <usd price>, ... }` object covering
/// every token Raydium lists.
pub type RaydiumPriceResponse = HashMap<String, FlexibleF64>;
