//! Telegram command execution against the alert service.
//!
//! Every reply is `MarkdownV2` text ready to send.

use tracing::{error, warn};

use crate::application::render::{self, escape_markdown};
use crate::application::service::AlertService;
use crate::domain::id::RecipientId;
use crate::error::StoreError;

use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};

const WELCOME: &str = "👋 Welcome to IPO Alert Bot\n\n\
    Your personal assistant for IPO news, GMP, stocks and calculators.";

/// Runtime command executor for Telegram commands.
#[derive(Clone)]
pub struct TelegramControl {
    service: AlertService,
}

impl TelegramControl {
    #[must_use]
    pub fn new(service: AlertService) -> Self {
        Self { service }
    }

    /// Reply for one incoming message.
    pub async fn respond(&self, recipient: RecipientId, text: &str) -> String {
        match parse_command(text) {
            Ok(command) => self.execute(recipient, command).await,
            Err(CommandParseError::NotACommand) => {
                escape_markdown("⚠️ Send a command or a stock symbol. Use /help for the list.")
            }
            Err(err) => escape_markdown(&format!("Invalid command: {err}\n\n{}", command_help())),
        }
    }

    /// Execute one parsed command and return response text.
    pub async fn execute(&self, recipient: RecipientId, command: TelegramCommand) -> String {
        match self.run(recipient, command).await {
            Ok(text) => text,
            Err(e) => {
                error!(recipient_id = %recipient, error = %e, "Command failed on store");
                escape_markdown("⚠️ Something went wrong, please try again later.")
            }
        }
    }

    async fn run(&self, recipient: RecipientId, command: TelegramCommand) -> Result<String, StoreError> {
        let text = match command {
            TelegramCommand::Start => {
                self.service.register(recipient).await?;
                escape_markdown(&format!("{WELCOME}\n\n{}", command_help()))
            }
            TelegramCommand::Help => escape_markdown(command_help()),
            TelegramCommand::Upcoming => render::upcoming(&self.service.upcoming_offerings().await),
            TelegramCommand::Predictions => {
                render::predictions(&self.service.upcoming_offerings().await)
            }
            TelegramCommand::News => render::headlines(&self.service.headlines().await),
            TelegramCommand::Sip(args) => match self.service.sip(args.amount, args.years, args.rate) {
                Ok(projection) => render::sip(&projection),
                Err(e) => escape_markdown(&format!("⚠️ {e}")),
            },
            TelegramCommand::Subscribe => {
                self.service.subscribe(recipient).await?;
                escape_markdown("✅ You are now subscribed for daily IPO alerts!")
            }
            TelegramCommand::Unsubscribe => {
                self.service.unsubscribe(recipient).await?;
                escape_markdown("🔕 Daily IPO alerts are off.")
            }
            TelegramCommand::Settings => render::settings(&self.service.settings(recipient).await?),
            TelegramCommand::Filter(update) => {
                render::settings(&self.service.update_filters(recipient, update).await?)
            }
            TelegramCommand::Time(time) => {
                self.service.set_notify_time(recipient, time).await?;
                escape_markdown(&format!("⏰ Preferred alert time set to {time}."))
            }
            TelegramCommand::Lookup(symbol) => match self.service.quote(&symbol).await {
                Some(quote) => render::quote(&quote),
                None => {
                    warn!(symbol = %symbol, "Quote lookup returned nothing");
                    escape_markdown(&format!("⚠️ No data for {symbol}."))
                }
            },
        };
        Ok(text)
    }
}
