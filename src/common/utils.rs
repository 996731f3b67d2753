// src/common/utils.rs
use crate::common::MonitorError;
use chrono::{DateTime, Local};
use tracing_subscriber::{EnvFilter, fmt};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Parse a string to a f64, return a MonitorError if the parsing fails
pub fn parse_f64(value: &str, field_name: &str) -> Result<f64, MonitorError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| MonitorError::ApiError(format!("Invalid {} format", field_name)))
}

// Parse a price field; prices must be finite and strictly positive
pub fn parse_price(value: &str, field_name: &str) -> Result<f64, MonitorError> {
    let price = parse_f64(value, field_name)?;
    if !price.is_finite() || price <= 0.0 {
        return Err(MonitorError::ApiError(format!(
            "Non-positive {}: {}",
            field_name, value
        )));
    }
    Ok(price)
}

// Human readable local timestamp used in operator messages
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Load `.env` from the working directory if present.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
