//! Application settings loaded from the environment (and `.env`).

use crate::common::{DEFAULT_TIMEOUT, MonitorError, load_dotenv};
use crate::dex::{SUSHISWAP_SUBGRAPH_URL, UNISWAP_SUBGRAPH_URL};
use crate::monitor::MonitorParams;
use crate::notify::TelegramConfig;
use std::str::FromStr;
use std::time::Duration;

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GraphQL endpoint of venue A.
    pub uniswap_subgraph_url: String,
    /// GraphQL endpoint of venue B.
    pub sushiswap_subgraph_url: String,
    /// Per-request timeout applied to both venues.
    pub request_timeout: Duration,
    /// Telegram credentials; `None` means notifications go to the log only.
    pub telegram: Option<TelegramConfig>,
    /// Parameters used by every `start` command.
    pub monitor: MonitorParams,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, MonitorError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MonitorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = MonitorParams::default();

        let tokens = match var("MONITOR_TOKENS") {
            Some(raw) => parse_token_list(&raw),
            None => defaults.tokens,
        };
        let base_token = var("MONITOR_BASE_TOKEN").unwrap_or(defaults.base_token);
        let interval = parse_var("MONITOR_INTERVAL_SECS", var("MONITOR_INTERVAL_SECS"))?
            .map(Duration::from_secs)
            .unwrap_or(defaults.interval);
        let min_profit =
            parse_var("MONITOR_MIN_PROFIT", var("MONITOR_MIN_PROFIT"))?.unwrap_or(defaults.min_profit);
        let silence_interval = parse_var("MONITOR_SILENCE_SECS", var("MONITOR_SILENCE_SECS"))?
            .map(Duration::from_secs)
            .unwrap_or(defaults.silence_interval);

        let monitor = MonitorParams {
            tokens,
            base_token,
            interval,
            min_profit,
            silence_interval,
        };
        monitor
            .validate()
            .map_err(|e| MonitorError::ConfigError(e.to_string()))?;

        let request_timeout = parse_var("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"))?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(MonitorError::ConfigError(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let telegram = match (var("TELEGRAM_BOT_TOKEN"), var("TELEGRAM_CHAT_ID")) {
            (None, None) => None,
            (Some(bot_token), Some(chat_id)) => {
                let chat_id = chat_id.parse::<i64>().map_err(|_| {
                    MonitorError::ConfigError(format!(
                        "TELEGRAM_CHAT_ID must be an integer, got `{}`",
                        chat_id
                    ))
                })?;
                Some(TelegramConfig { bot_token, chat_id })
            }
            (Some(_), None) => {
                return Err(MonitorError::ConfigError(
                    "TELEGRAM_CHAT_ID is required when TELEGRAM_BOT_TOKEN is set".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(MonitorError::ConfigError(
                    "TELEGRAM_BOT_TOKEN is required when TELEGRAM_CHAT_ID is set".to_string(),
                ));
            }
        };

        Ok(Self {
            uniswap_subgraph_url: var("UNISWAP_SUBGRAPH_URL")
                .unwrap_or_else(|| UNISWAP_SUBGRAPH_URL.to_string()),
            sushiswap_subgraph_url: var("SUSHISWAP_SUBGRAPH_URL")
                .unwrap_or_else(|| SUSHISWAP_SUBGRAPH_URL.to_string()),
            request_timeout,
            telegram,
            monitor,
        })
    }
}

// Comma separated symbols; whitespace and empty entries are dropped
fn parse_token_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>, MonitorError> {
    value
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                MonitorError::ConfigError(format!("{} has an invalid value `{}`", key, raw))
            })
        })
        .transpose()
}
