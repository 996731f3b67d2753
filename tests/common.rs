// Allow dead code warnings since different test files use different items from this module
#![allow(dead_code)]

use async_trait::async_trait;
use dex_arb_monitor::{
    MonitorError, Notifier, OpportunityScanner, PriceQuote, PriceSource, Venue,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub const BASE_TOKEN: &str = "USDT";

/// In-memory venue: quotes are keyed by quote token; a missing key is a fetch failure.
pub struct MockPriceSource {
    venue: Venue,
    quotes: Mutex<HashMap<String, PriceQuote>>,
    calls: Mutex<Vec<(String, String)>>,
    latency: Option<Duration>,
}

impl MockPriceSource {
    pub fn new(venue: Venue) -> Self {
        Self {
            venue,
            quotes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            latency: None,
        }
    }

    /// Every quote takes `latency` to come back.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_quote(self, token: &str, price0: f64, price1: f64) -> Self {
        self.set_quote(token, price0, price1);
        self
    }

    pub fn set_quote(&self, token: &str, price0: f64, price1: f64) {
        self.quotes
            .lock()
            .insert(token.to_string(), PriceQuote::new(price0, price1));
    }

    pub fn remove_quote(&self, token: &str) {
        self.quotes.lock().remove(token);
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn queried(&self, token: &str) -> bool {
        self.calls.lock().iter().any(|(_, quote)| quote == token)
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn venue(&self) -> Venue {
        self.venue
    }

    async fn get_price(
        &self,
        base_token: &str,
        quote_token: &str,
    ) -> Result<PriceQuote, MonitorError> {
        self.calls
            .lock()
            .push((base_token.to_string(), quote_token.to_string()));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.quotes.lock().get(quote_token).copied().ok_or_else(|| {
            MonitorError::PairNotFound(format!("{}/{} on {}", base_token, quote_token, self.venue))
        })
    }
}

/// Records every message it is asked to send; optionally fails every delivery.
///
/// With a latency set, a message is recorded only once its delivery completes.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail: AtomicBool,
    latency: Option<Duration>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Every attempted delivery, failed ones included.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages
            .lock()
            .iter()
            .filter(|message| message.contains(needle))
            .count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel_name(&self) -> &str {
        "recording"
    }

    async fn send(&self, text: &str) -> Result<(), MonitorError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.messages.lock().push(text.to_string());

        if self.fail.load(Ordering::SeqCst) {
            return Err(MonitorError::DeliveryError("channel unreachable".to_string()));
        }
        Ok(())
    }
}

/// Venue A is Uniswap, venue B is SushiSwap.
pub fn mock_venues() -> (Arc<MockPriceSource>, Arc<MockPriceSource>) {
    (
        Arc::new(MockPriceSource::new(Venue::Uniswap)),
        Arc::new(MockPriceSource::new(Venue::SushiSwap)),
    )
}

pub fn scanner_for(
    venue_a: &Arc<MockPriceSource>,
    venue_b: &Arc<MockPriceSource>,
) -> Arc<OpportunityScanner> {
    Arc::new(OpportunityScanner::new(
        Arc::clone(venue_a) as Arc<dyn PriceSource>,
        Arc::clone(venue_b) as Arc<dyn PriceSource>,
    ))
}

pub fn tokens(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|symbol| symbol.to_string()).collect()
}

pub const START_MESSAGE: &str = "Monitoring started at";
pub const STOP_MESSAGE: &str = "Monitoring stopped at";
pub const SILENCE_MESSAGE: &str = "No arbitrage opportunities detected";
pub const OPPORTUNITY_MESSAGE: &str = "Arbitrage Opportunity Detected";
