use crate::common::CommandError;
use std::time::Duration;

/// Candidate tokens scanned when the operator does not configure a list.
pub const DEFAULT_TOKENS: [&str; 16] = [
    "DAI", "ETH", "WBTC", "LINK", "MATIC", "AAVE", "UNI", "COMP", "USDC", "YFI", "SUSHI", "SNX",
    "BAL", "CRV", "1INCH", "MKR",
];
pub const DEFAULT_BASE_TOKEN: &str = "USDT";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
/// Percent.
pub const DEFAULT_MIN_PROFIT: f64 = 0.1;
pub const DEFAULT_SILENCE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Everything one monitoring session runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorParams {
    pub tokens: Vec<String>,
    pub base_token: String,
    /// Sleep between two scan ticks.
    pub interval: Duration,
    /// Minimum profit percentage an opportunity needs to be notified.
    pub min_profit: f64,
    /// Minimum gap between two "no opportunity" reports.
    pub silence_interval: Duration,
}

impl Default for MonitorParams {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_TOKENS.iter().map(|token| token.to_string()).collect(),
            base_token: DEFAULT_BASE_TOKEN.to_string(),
            interval: DEFAULT_INTERVAL,
            min_profit: DEFAULT_MIN_PROFIT,
            silence_interval: DEFAULT_SILENCE_INTERVAL,
        }
    }
}

impl MonitorParams {
    pub fn new(tokens: &[&str], base_token: &str, interval: Duration, min_profit: f64) -> Self {
        Self {
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            base_token: base_token.to_string(),
            interval,
            min_profit,
            silence_interval: DEFAULT_SILENCE_INTERVAL,
        }
    }

    pub fn with_silence_interval(mut self, silence_interval: Duration) -> Self {
        self.silence_interval = silence_interval;
        self
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        if self.base_token.is_empty() {
            return Err(CommandError::InvalidParams(
                "base token cannot be empty".to_string(),
            ));
        }
        if self.tokens.is_empty() {
            return Err(CommandError::InvalidParams(
                "token list cannot be empty".to_string(),
            ));
        }
        if self.tokens.iter().any(|token| token.is_empty()) {
            return Err(CommandError::InvalidParams(
                "token symbols cannot be empty".to_string(),
            ));
        }
        if self.interval.is_zero() {
            return Err(CommandError::InvalidParams(
                "scan interval must be greater than zero".to_string(),
            ));
        }
        if self.silence_interval.is_zero() {
            return Err(CommandError::InvalidParams(
                "silence interval must be greater than zero".to_string(),
            ));
        }
        if !self.min_profit.is_finite() || self.min_profit < 0.0 {
            return Err(CommandError::InvalidParams(format!(
                "min_profit must be a non-negative number, got {}",
                self.min_profit
            )));
        }
        Ok(())
    }
}
