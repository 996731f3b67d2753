//! Pair-price queries against Uniswap V2 style subgraphs.
//!
//! Both venues expose the same `pairs` entity, so the query, the response types and
//! the conversion into a [`PriceQuote`] live here and the venue modules only supply
//! their endpoint.

mod types;

use crate::common::{GraphQlResponse, MonitorError, PriceQuote, VenueTrait, parse_price};
use serde_json::json;
use tracing::{debug, info};
pub use types::{MetaData, PairPrice, PairsData};

/// Pair lookup by token symbols; `token0` is the base token.
pub const PAIR_PRICE_QUERY: &str = r#"
query PairPrice($token0: String!, $token1: String!) {
  pairs(first: 1, where: { token0_: { symbol: $token0 }, token1_: { symbol: $token1 } }) {
    token0Price
    token1Price
  }
}
"#;

pub const META_QUERY: &str = "query Meta { _meta { block { number } } }";

pub fn pair_variables(base_token: &str, quote_token: &str) -> serde_json::Value {
    json!({ "token0": base_token, "token1": quote_token })
}

/// Converts the first returned pair into a quote. An empty result set is a failure.
pub fn quote_from_pairs(
    venue_name: &str,
    base_token: &str,
    quote_token: &str,
    data: PairsData,
) -> Result<PriceQuote, MonitorError> {
    let pair = data.pairs.into_iter().next().ok_or_else(|| {
        MonitorError::PairNotFound(format!("{}/{} on {}", base_token, quote_token, venue_name))
    })?;

    let price0 = parse_price(&pair.token0_price, "token0Price")?;
    let price1 = parse_price(&pair.token1_price, "token1Price")?;

    Ok(PriceQuote::new(price0, price1))
}

/// Parses a raw GraphQL response body for a pair query.
pub fn parse_pair_response(
    venue_name: &str,
    base_token: &str,
    quote_token: &str,
    body: &str,
) -> Result<PriceQuote, MonitorError> {
    let response: GraphQlResponse<PairsData> = serde_json::from_str(body)?;
    let data = response.into_data(venue_name)?;
    quote_from_pairs(venue_name, base_token, quote_token, data)
}

pub async fn fetch_pair_quote<V: VenueTrait>(
    venue: &V,
    base_token: &str,
    quote_token: &str,
) -> Result<PriceQuote, MonitorError> {
    // Validate symbols before hitting the network
    if base_token.is_empty() || quote_token.is_empty() {
        return Err(MonitorError::InvalidSymbol(
            "Token symbol cannot be empty".to_string(),
        ));
    }

    let data: PairsData = venue
        .query(PAIR_PRICE_QUERY, pair_variables(base_token, quote_token))
        .await?;
    let quote = quote_from_pairs(venue.venue_name(), base_token, quote_token, data)?;

    debug!(
        venue = venue.venue_name(),
        base_token,
        quote_token,
        price0 = quote.price0,
        price1 = quote.price1,
        "pair quote"
    );

    Ok(quote)
}

pub async fn check_meta<V: VenueTrait>(venue: &V) -> Result<(), MonitorError> {
    let meta: MetaData = venue
        .query(META_QUERY, json!({}))
        .await
        .map_err(|e| {
            MonitorError::HealthCheckFailed(format!("{}: {}", venue.venue_name(), e))
        })?;

    info!(
        venue = venue.venue_name(),
        block = meta.meta.block.number,
        "subgraph reachable"
    );

    Ok(())
}
