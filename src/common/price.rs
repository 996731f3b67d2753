use serde::{Deserialize, Serialize};

/// Prices of both legs of a pair as quoted by one venue.
///
/// `price0` is the price of the pair's first token (the base token the scanner
/// queries with), `price1` the reverse leg. Both are positive; a venue that cannot
/// produce them reports a fetch failure instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price0: f64,
    pub price1: f64,
}

impl PriceQuote {
    pub fn new(price0: f64, price1: f64) -> Self {
        Self { price0, price1 }
    }
}
