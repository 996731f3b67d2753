//! Operator commands: parse a chat message, drive the shared [`MonitorSession`],
//! and produce the reply text.

mod telegram;

use crate::common::CommandError;
use crate::monitor::{MonitorParams, MonitorSession, MonitorState};
use std::sync::Arc;
use tracing::info;

pub use telegram::run_telegram_control;

pub const REPLY_STARTED: &str = "Monitoring has started.";
pub const REPLY_ALREADY_RUNNING: &str = "Monitoring is already running.";
pub const REPLY_STOPPED: &str = "Monitoring has been stopped.";
pub const REPLY_NOT_RUNNING: &str = "Monitoring is not running.";
pub const REPLY_STOPPING: &str = "Monitoring is stopping, try again shortly.";
pub const REPLY_STATUS_RUNNING: &str = "✅ Monitoring is currently running.";
pub const REPLY_STATUS_IDLE: &str = "❌ Monitoring is not running.";
pub const REPLY_STATUS_STOPPING: &str = "⏳ Monitoring is stopping.";

/// Supported operator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    Status,
    Help,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("message is not a command")]
    NotACommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

/// Parse a chat message into a command. A `@botname` suffix is ignored.
pub fn parse_command(text: &str) -> Result<ControlCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(ControlCommand::Start),
        "/stop" => Ok(ControlCommand::Stop),
        "/status" => Ok(ControlCommand::Status),
        "/help" => Ok(ControlCommand::Help),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Command names and descriptions for the bot's "/" menu.
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Start arbitrage monitoring"),
        ("stop", "Stop arbitrage monitoring"),
        ("status", "Show whether monitoring is running"),
        ("help", "List available commands"),
    ]
}

fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for (command, description) in bot_commands() {
        text.push_str(&format!("\n/{} - {}", command, description));
    }
    text
}

/// Binds operator commands to one session and the parameters `start` uses.
pub struct ControlSurface {
    session: Arc<MonitorSession>,
    params: MonitorParams,
}

impl ControlSurface {
    pub fn new(session: Arc<MonitorSession>, params: MonitorParams) -> Self {
        Self { session, params }
    }

    pub fn session(&self) -> &Arc<MonitorSession> {
        &self.session
    }

    pub async fn execute(&self, command: ControlCommand) -> String {
        info!(?command, "operator command");

        match command {
            ControlCommand::Start => match self.session.start(self.params.clone()) {
                Ok(()) => REPLY_STARTED.to_string(),
                Err(CommandError::AlreadyRunning) => REPLY_ALREADY_RUNNING.to_string(),
                Err(CommandError::StopInProgress) => REPLY_STOPPING.to_string(),
                Err(e) => format!("Cannot start monitoring: {}", e),
            },
            ControlCommand::Stop => match self.session.stop().await {
                Ok(()) => REPLY_STOPPED.to_string(),
                Err(CommandError::StopInProgress) => REPLY_STOPPING.to_string(),
                Err(_) => REPLY_NOT_RUNNING.to_string(),
            },
            ControlCommand::Status => match self.session.status() {
                MonitorState::Running => REPLY_STATUS_RUNNING.to_string(),
                MonitorState::Stopping => REPLY_STATUS_STOPPING.to_string(),
                MonitorState::Idle => REPLY_STATUS_IDLE.to_string(),
            },
            ControlCommand::Help => help_text(),
        }
    }

    /// Reply for a raw chat message; `None` for messages that are not commands.
    pub async fn respond_to(&self, text: &str) -> Option<String> {
        match parse_command(text) {
            Ok(command) => Some(self.execute(command).await),
            Err(CommandParseError::NotACommand) => None,
            Err(e) => Some(format!("{}. Send /help for the command list.", e)),
        }
    }
}
