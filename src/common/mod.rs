pub mod client;
pub mod config;
pub mod errors;
pub mod price;
pub mod utils;
pub mod venue;

// Re-export
pub use client::{DEFAULT_TIMEOUT, create_http_client};
pub use config::AppConfig;
pub use errors::{CommandError, MonitorError};
pub use price::PriceQuote;
pub use utils::{format_timestamp, init_logging, load_dotenv, parse_f64, parse_price};
pub use venue::{GraphQlError, GraphQlResponse, PriceSource, Venue, VenueTrait};
