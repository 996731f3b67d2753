use super::{ControlSurface, bot_commands};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

/// Listens for operator commands until the dispatcher stops (Ctrl-C).
///
/// Only messages from `allowed_chat` are honoured.
pub async fn run_telegram_control(bot: Bot, allowed_chat: i64, control: Arc<ControlSurface>) {
    let allowed_chat = ChatId(allowed_chat);

    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(chat_id = allowed_chat.0, "Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let control = Arc::clone(&control);
        async move {
            if msg.chat.id != allowed_chat {
                warn!(chat_id = msg.chat.id.0, "Ignoring command from unauthorized chat");
                return respond(());
            }

            let Some(text) = msg.text() else {
                return respond(());
            };

            if let Some(reply) = control.respond_to(text).await {
                if let Err(e) = bot.send_message(msg.chat.id, reply).await {
                    error!(error = %e, "Failed to send Telegram command response");
                }
            }

            respond(())
        }
    })
    .await;

    info!("Telegram command listener stopped");
}

async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(command, description)| BotCommand::new(command, description))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
