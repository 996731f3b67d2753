use crate::common::{MonitorError, PriceQuote, PriceSource, Venue, VenueTrait};
use crate::create_venue;
use crate::dex::subgraph::{check_meta, fetch_pair_quote};
use async_trait::async_trait;

pub const SUSHISWAP_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/sushiswap/exchange";

create_venue!(SushiSwap, SUSHISWAP_SUBGRAPH_URL);

#[async_trait]
impl VenueTrait for SushiSwap {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "SushiSwap"
    }

    async fn health_check(&self) -> Result<(), MonitorError> {
        // SushiSwap's exchange subgraph shares the V2 schema, `_meta` included
        check_meta(self).await
    }
}

#[async_trait]
impl PriceSource for SushiSwap {
    fn venue(&self) -> Venue {
        Venue::SushiSwap
    }

    async fn get_price(
        &self,
        base_token: &str,
        quote_token: &str,
    ) -> Result<PriceQuote, MonitorError> {
        fetch_pair_quote(self, base_token, quote_token).await
    }
}
