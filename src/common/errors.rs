#[derive(thiserror::Error, Debug)]
pub enum MonitorError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("No pair found for {0}")]
    PairNotFound(String),

    #[error("Delivery error: {0}")]
    DeliveryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Rejections of operator commands. These are informational, not faults.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Monitoring is already running")]
    AlreadyRunning,

    #[error("Monitoring is not running")]
    NotRunning,

    #[error("Monitoring is stopping")]
    StopInProgress,

    #[error("Invalid monitor parameters: {0}")]
    InvalidParams(String),
}
