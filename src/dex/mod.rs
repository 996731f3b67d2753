// imports
pub mod subgraph;
pub mod sushiswap;
pub mod uniswap;

// re-exports
pub use sushiswap::{SUSHISWAP_SUBGRAPH_URL, SushiSwap};
pub use uniswap::{UNISWAP_SUBGRAPH_URL, Uniswap};
