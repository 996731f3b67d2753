use crate::common::MonitorError;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client, MonitorError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Accept",
                reqwest::header::HeaderValue::from_static("application/json"),
            );
            headers
        })
        .build()?;

    Ok(client)
}
