//! One monitoring run: dedup memory, silence timer and the scan/notify cycle.

use super::MonitorParams;
use crate::notify::{
    Notifier, format_opportunity_message, format_silence_message, format_start_message,
    format_stop_message,
};
use crate::scanner::{ArbitrageOpportunity, DedupMemory, OpportunityScanner};
use chrono::Local;
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What a tick did after scanning.
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// The best opportunity cleared `min_profit` and was sent.
    Opportunity(ArbitrageOpportunity),
    /// Nothing was sent. `rejected` is a best opportunity that missed `min_profit`.
    Quiet {
        rejected: Option<ArbitrageOpportunity>,
    },
    /// Nothing qualified and the silence interval had elapsed, so a heartbeat was sent.
    SilenceReported {
        rejected: Option<ArbitrageOpportunity>,
    },
}

pub struct ScanLoop {
    scanner: Arc<OpportunityScanner>,
    notifier: Arc<dyn Notifier>,
    params: MonitorParams,
    dedup: DedupMemory,
    last_silence: Instant,
    ticks: u64,
}

impl ScanLoop {
    /// `started_at` seeds the silence timer.
    pub fn new(
        scanner: Arc<OpportunityScanner>,
        notifier: Arc<dyn Notifier>,
        params: MonitorParams,
        started_at: Instant,
    ) -> Self {
        Self {
            scanner,
            notifier,
            params,
            dedup: DedupMemory::new(),
            last_silence: started_at,
            ticks: 0,
        }
    }

    pub fn dedup(&self) -> &DedupMemory {
        &self.dedup
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub async fn announce_start(&self) {
        self.deliver(&format_start_message(&Local::now())).await;
    }

    pub async fn announce_stop(&self) {
        self.deliver(&format_stop_message(&Local::now())).await;
    }

    /// Scan then act, as the loop does on every iteration.
    pub async fn tick(&mut self, now: Instant) -> TickOutcome {
        let best = self.scan().await;
        self.act(best, now).await
    }

    async fn scan(&mut self) -> Option<ArbitrageOpportunity> {
        self.ticks += 1;
        self.scanner
            .scan(&self.params.tokens, &self.params.base_token, &mut self.dedup)
            .await
    }

    async fn act(&mut self, best: Option<ArbitrageOpportunity>, now: Instant) -> TickOutcome {
        let rejected = match best {
            Some(opportunity) if opportunity.is_profitable(self.params.min_profit) => {
                info!(
                    token = %opportunity.token,
                    profit_percentage = opportunity.profit_percentage,
                    "[OPP] arbitrage opportunity"
                );
                self.deliver(&format_opportunity_message(&opportunity)).await;
                return TickOutcome::Opportunity(opportunity);
            }
            other => other,
        };

        if let Some(opportunity) = &rejected {
            debug!(
                token = %opportunity.token,
                profit_percentage = opportunity.profit_percentage,
                min_profit = self.params.min_profit,
                "best opportunity below threshold"
            );
        }

        if now.saturating_duration_since(self.last_silence) >= self.params.silence_interval {
            info!(ticks = self.ticks, "[HEARTBEAT] no opportunities above threshold");
            self.deliver(&format_silence_message(&Local::now())).await;
            self.last_silence = now;
            return TickOutcome::SilenceReported { rejected };
        }

        TickOutcome::Quiet { rejected }
    }

    /// Runs ticks until `cancel` fires. Cancellation is observed while scanning and
    /// while sleeping, never in the middle of a delivery.
    pub async fn run(&mut self, cancel: &CancellationToken) {
        loop {
            let best = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                best = self.scan() => best,
            };

            self.act(best, Instant::now()).await;

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.params.interval) => {}
            }
        }

        debug!(
            ticks = self.ticks,
            seen = self.dedup.len(),
            "scan loop cancelled"
        );
    }

    async fn deliver(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            warn!(
                channel = self.notifier.channel_name(),
                error = %e,
                "notification delivery failed"
            );
        }
    }
}
