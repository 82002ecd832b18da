//! Inbound Telegram command listener.
//!
//! Requires the `telegram` feature to be enabled.

use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tracing::{error, info, warn};

use crate::domain::id::RecipientId;

use super::command::bot_commands;
use super::control::TelegramControl;

/// Answer commands until the process receives Ctrl-C.
pub async fn run_command_listener(bot: Bot, control: TelegramControl) {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!("Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let control = control.clone();
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            let recipient = RecipientId::new(msg.chat.id.0);
            let reply = control.respond(recipient, text).await;
            if let Err(e) = bot
                .send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::MarkdownV2)
                .await
            {
                error!(recipient_id = %recipient, error = %e, "Failed to send Telegram command response");
            }

            respond(())
        }
    })
    .await;

    info!("Telegram command listener stopped");
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
