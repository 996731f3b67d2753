use crate::common::{MonitorError, PriceQuote};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Common venue enum definition

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Venue {
    Uniswap,
    SushiSwap,
}

impl Venue {
    pub fn name(&self) -> &'static str {
        match self {
            Venue::Uniswap => "Uniswap",
            Venue::SushiSwap => "SushiSwap",
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// Envelope of every GraphQL response: `data` and/or a list of `errors`.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Reported errors win over partial data.
    pub fn into_data(self, venue_name: &str) -> Result<T, MonitorError> {
        if let Some(error) = self.errors.first() {
            return Err(MonitorError::ApiError(format!(
                "{} API error: {}",
                venue_name, error.message
            )));
        }

        self.data
            .ok_or_else(|| MonitorError::ApiError(format!("{} API returned no data", venue_name)))
    }
}

// Common venue trait definition: HTTP/GraphQL plumbing shared by subgraph venues
#[async_trait]
pub trait VenueTrait: Send + Sync {
    // Venue specific methods
    fn endpoint(&self) -> &str;
    fn client(&self) -> &reqwest::Client;
    fn venue_name(&self) -> &str;

    // Default implementations
    async fn query<T: DeserializeOwned + Send>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, MonitorError> {
        let body = GraphQlRequest { query, variables };
        let response = self
            .client()
            .post(self.endpoint())
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MonitorError::ApiError(format!(
                "{} API error: {} - {}",
                self.venue_name(),
                status,
                error_text
            )));
        }

        let payload: GraphQlResponse<T> = response.json().await?;
        payload.into_data(self.venue_name())
    }

    // Trait methods
    async fn health_check(&self) -> Result<(), MonitorError>;
}

/// A venue able to quote a base/quote token pair.
///
/// `get_price` reports why a quote could not be produced; `fetch` is what the
/// scanner calls: it logs the failure here, at the source, and hands back `None`
/// so one venue's outage never aborts a scan.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn venue(&self) -> Venue;

    async fn get_price(
        &self,
        base_token: &str,
        quote_token: &str,
    ) -> Result<PriceQuote, MonitorError>;

    async fn fetch(&self, base_token: &str, quote_token: &str) -> Option<PriceQuote> {
        match self.get_price(base_token, quote_token).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!(
                    venue = %self.venue(),
                    base_token,
                    quote_token,
                    error = %e,
                    "price fetch failed"
                );
                None
            }
        }
    }
}

// VENUE MACRO EXPORTS
#[macro_export]
macro_rules! create_venue {
    (
        $struct_name:ident, $default_endpoint:expr
    ) => {
        pub struct $struct_name {
            client: reqwest::Client,
            endpoint: String,
        }

        impl $struct_name {
            /// Client for the public endpoint with the default request timeout.
            pub fn new() -> Result<Self, $crate::common::MonitorError> {
                Self::with_endpoint($default_endpoint, $crate::common::DEFAULT_TIMEOUT)
            }

            pub fn with_endpoint(
                endpoint: impl Into<String>,
                timeout: std::time::Duration,
            ) -> Result<Self, $crate::common::MonitorError> {
                Ok(Self {
                    client: $crate::common::create_http_client(timeout)?,
                    endpoint: endpoint.into(),
                })
            }
        }
    };
}
