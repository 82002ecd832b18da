//! Outbound delivery through the Telegram Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::{ApiError, RequestError};

use crate::domain::id::RecipientId;
use crate::error::DeliveryError;
use crate::port::outbound::transport::Transport;

/// Sends `MarkdownV2` messages to a chat.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, recipient: RecipientId, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(recipient.get()), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map(|_| ())
            .map_err(|e| delivery_error(&e))
    }
}

/// Classify a Bot API failure.
pub(crate) fn delivery_error(err: &RequestError) -> DeliveryError {
    match err {
        RequestError::Api(
            ApiError::BotBlocked
            | ApiError::ChatNotFound
            | ApiError::UserDeactivated
            | ApiError::BotKicked
            | ApiError::BotKickedFromSupergroup
            | ApiError::CantInitiateConversation
            | ApiError::CantTalkWithBots,
        ) => DeliveryError::Unreachable,
        RequestError::RetryAfter(_) => DeliveryError::RateLimited,
        other => DeliveryError::Transport(other.to_string()),
    }
}
