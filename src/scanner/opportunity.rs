use crate::common::Venue;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// Nominal validity of the quoted prices, in seconds. Informational only.
pub const TRADE_WINDOW_SECS: i64 = 60;

/// Arbitrage opportunity - buy the token on venue A with the base token, sell it on venue B
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// Token to trade (e.g., "ETH")
    pub token: String,
    /// Base token the token is priced against (e.g., "USDT")
    pub base_token: String,
    /// Venue to buy on (venue A)
    pub buy_venue: Venue,
    /// Venue to sell on (venue B)
    pub sell_venue: Venue,
    /// Profit percentage ((price_venue_b - price_venue_a) / price_venue_a * 100)
    pub profit_percentage: f64,
    /// First price component quoted by venue A
    pub price_venue_a: f64,
    /// First price component quoted by venue B
    pub price_venue_b: f64,
    pub window_start: DateTime<Local>,
    pub window_end: DateTime<Local>,
}

impl ArbitrageOpportunity {
    pub fn new(
        token: &str,
        base_token: &str,
        buy_venue: Venue,
        sell_venue: Venue,
        price_venue_a: f64,
        price_venue_b: f64,
        window_start: DateTime<Local>,
    ) -> Self {
        Self {
            token: token.to_string(),
            base_token: base_token.to_string(),
            buy_venue,
            sell_venue,
            profit_percentage: profit_percentage(price_venue_a, price_venue_b),
            price_venue_a,
            price_venue_b,
            window_start,
            window_end: window_start + Duration::seconds(TRADE_WINDOW_SECS),
        }
    }

    /// Whether the profit clears the caller's minimum (inclusive).
    pub fn is_profitable(&self, min_profit_percentage: f64) -> bool {
        self.profit_percentage >= min_profit_percentage
    }
}

/// Relative price difference of venue B over venue A, in percent.
pub fn profit_percentage(price_venue_a: f64, price_venue_b: f64) -> f64 {
    (price_venue_b - price_venue_a) / price_venue_a * 100.0
}
