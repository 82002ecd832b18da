//! Telegram configuration.

use serde::Deserialize;

/// Telegram delivery and command listener configuration.
///
/// The bot token is read from `TELEGRAM_BOT_TOKEN` at load time, never from
/// the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Deliver digests and answer commands through Telegram.
    #[serde(default)]
    pub enabled: bool,
    /// Bot token loaded from `TELEGRAM_BOT_TOKEN` env var at runtime.
    #[serde(skip)]
    pub bot_token: Option<String>,
}
