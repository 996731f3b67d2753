use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairsData {
    pub pairs: Vec<PairPrice>,
}

// BigDecimal values arrive as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPrice {
    #[serde(rename = "token0Price")]
    pub token0_price: String,
    #[serde(rename = "token1Price")]
    pub token1_price: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub block: MetaBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaBlock {
    pub number: u64,
}
