//! Operator notifications.
//!
//! The monitor only needs "send this text, tell me if it failed"; the channel behind
//! it is a [`Notifier`] implementation.

pub mod format;
mod telegram;

use crate::common::MonitorError;
use async_trait::async_trait;
use tracing::info;

pub use format::{
    format_opportunity_message, format_silence_message, format_start_message,
    format_stop_message,
};
pub use telegram::{TelegramConfig, TelegramNotifier};

#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel_name(&self) -> &str;

    /// Delivers one message. Failures are returned to the caller, never panicked on.
    async fn send(&self, text: &str) -> Result<(), MonitorError>;
}

/// Writes notifications to the log. Used when no messaging channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn channel_name(&self) -> &str {
        "log"
    }

    async fn send(&self, text: &str) -> Result<(), MonitorError> {
        info!(channel = "log", "{}", text);
        Ok(())
    }
}
