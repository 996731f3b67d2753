use crate::common::{PriceQuote, PriceSource, Venue};
use chrono::Local;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

mod dedup;
mod opportunity;
pub use dedup::DedupMemory;
pub use opportunity::{ArbitrageOpportunity, TRADE_WINDOW_SECS, profit_percentage};

/// Opportunity scanner - compares venue A against venue B for every candidate token
/// and picks the single best unseen opportunity of a scan pass
pub struct OpportunityScanner {
    venue_a: Arc<dyn PriceSource>,
    venue_b: Arc<dyn PriceSource>,
}

impl OpportunityScanner {
    /// `venue_a` is the buy side, `venue_b` the sell side of every opportunity
    pub fn new(venue_a: Arc<dyn PriceSource>, venue_b: Arc<dyn PriceSource>) -> Self {
        Self { venue_a, venue_b }
    }

    pub fn venue_a(&self) -> Venue {
        self.venue_a.venue()
    }

    pub fn venue_b(&self) -> Venue {
        self.venue_b.venue()
    }

    /// Runs one scan pass and returns the best opportunity, if any
    ///
    /// # Arguments
    /// * `tokens` - Candidate tokens (e.g., ["ETH", "LINK"]); the base token is skipped if listed
    /// * `base_token` - Token every candidate is priced against (e.g., "USDT")
    /// * `dedup` - Session memory; the returned token is inserted before this returns
    ///
    /// # Returns
    /// The unseen candidate with the strictly greatest positive profit percentage.
    /// Ties keep the first candidate in input order. Tokens whose quote failed on
    /// either venue are skipped for this pass only.
    pub async fn scan(
        &self,
        tokens: &[String],
        base_token: &str,
        dedup: &mut DedupMemory,
    ) -> Option<ArbitrageOpportunity> {
        let window_start = Local::now();

        // Seen tokens can never qualify, so they are not queried either
        let candidates: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|token| *token != base_token && !dedup.contains(token))
            .collect();

        let quotes = self.fetch_quotes(&candidates, base_token).await;

        let mut best: Option<ArbitrageOpportunity> = None;

        for (token, quote) in candidates.iter().zip(quotes) {
            let Some((quote_a, quote_b)) = quote else {
                continue;
            };

            let profit = profit_percentage(quote_a.price0, quote_b.price0);
            debug!(
                token,
                price_a = quote_a.price0,
                price_b = quote_b.price0,
                profit_percentage = profit,
                "quoted"
            );

            if profit.is_nan() || profit <= 0.0 {
                continue;
            }

            let improves = match &best {
                Some(current) => profit > current.profit_percentage,
                None => true,
            };

            if improves {
                best = Some(ArbitrageOpportunity::new(
                    token,
                    base_token,
                    self.venue_a(),
                    self.venue_b(),
                    quote_a.price0,
                    quote_b.price0,
                    window_start,
                ));
            }
        }

        if let Some(opportunity) = &best {
            dedup.insert(&opportunity.token);
            info!(
                token = %opportunity.token,
                profit_percentage = opportunity.profit_percentage,
                "best opportunity of scan"
            );
        }

        best
    }

    /// Fetches both venues for every candidate in parallel; results keep input order
    async fn fetch_quotes(
        &self,
        candidates: &[&str],
        base_token: &str,
    ) -> Vec<Option<(PriceQuote, PriceQuote)>> {
        let futures: Vec<_> = candidates
            .iter()
            .map(|token| async move {
                let (quote_a, quote_b) = tokio::join!(
                    self.venue_a.fetch(base_token, token),
                    self.venue_b.fetch(base_token, token)
                );
                quote_a.zip(quote_b)
            })
            .collect();

        join_all(futures).await
    }
}
