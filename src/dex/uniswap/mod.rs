use crate::common::{MonitorError, PriceQuote, PriceSource, Venue, VenueTrait};
use crate::create_venue;
use crate::dex::subgraph::{check_meta, fetch_pair_quote};
use async_trait::async_trait;

pub const UNISWAP_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v2";

create_venue!(Uniswap, UNISWAP_SUBGRAPH_URL);

#[async_trait]
impl VenueTrait for Uniswap {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Uniswap"
    }

    async fn health_check(&self) -> Result<(), MonitorError> {
        check_meta(self).await
    }
}

#[async_trait]
impl PriceSource for Uniswap {
    fn venue(&self) -> Venue {
        Venue::Uniswap
    }

    async fn get_price(
        &self,
        base_token: &str,
        quote_token: &str,
    ) -> Result<PriceQuote, MonitorError> {
        fetch_pair_quote(self, base_token, quote_token).await
    }
}
