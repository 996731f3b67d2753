//! `dex-arb-monitor`
//!
//! Compare Uniswap and SushiSwap subgraph quotes for a list of tokens against one base
//! token, surface the best unseen price discrepancy of every scan, and notify an
//! operator. A single [`MonitorSession`] owns the scan loop and is driven by
//! start/stop/status commands.
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::sync::Arc;
//! use dex_arb_monitor::{
//!     LogNotifier, MonitorParams, MonitorSession, OpportunityScanner, SushiSwap, Uniswap,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = OpportunityScanner::new(Arc::new(Uniswap::new()?), Arc::new(SushiSwap::new()?));
//! let session = MonitorSession::new(Arc::new(scanner), Arc::new(LogNotifier));
//!
//! session.start(MonitorParams::default())?;
//! tokio::time::sleep(std::time::Duration::from_secs(300)).await;
//! session.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod control;
pub mod dex;
pub mod monitor;
pub mod notify;
pub mod scanner;

// Re-export common types
pub use common::{
    AppConfig, CommandError, MonitorError, PriceQuote, PriceSource, Venue, VenueTrait,
    init_logging,
};
pub use control::{ControlCommand, ControlSurface, parse_command, run_telegram_control};
pub use dex::{SushiSwap, Uniswap};
pub use monitor::{MonitorParams, MonitorSession, MonitorState, ScanLoop, TickOutcome};
pub use notify::{LogNotifier, Notifier, TelegramConfig, TelegramNotifier};
pub use scanner::{ArbitrageOpportunity, DedupMemory, OpportunityScanner};
