//! Telegram command parsing.

use crate::domain::subscriber::{BudgetTier, FilterUpdate, NotifyTime, Patch, RiskTier};

/// SIP inputs used when `/sip` has no arguments.
pub const DEFAULT_SIP: SipArgs = SipArgs {
    amount: 10_000,
    years: 10,
    rate: 0.12,
};

/// Arguments of `/sip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipArgs {
    pub amount: u64,
    pub years: u32,
    /// Annual return as a fraction.
    pub rate: f64,
}

/// Supported Telegram commands.
#[derive(Debug, Clone, PartialEq)]
pub enum TelegramCommand {
    Start,
    Help,
    Upcoming,
    Predictions,
    News,
    Sip(SipArgs),
    Subscribe,
    Unsubscribe,
    Settings,
    Filter(FilterUpdate),
    Time(NotifyTime),
    /// Bare word: quote lookup for that symbol.
    Lookup(String),
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidFilterField(String),
    InvalidValue { field: &'static str, value: String },
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
            Self::MissingArgument(name) => write!(f, "missing argument `{name}`"),
            Self::InvalidFilterField(field) => {
                write!(f, "invalid filter `{field}` (use: sector, budget, risk)")
            }
            Self::InvalidValue { field, value } => write!(f, "invalid {field} `{value}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
///
/// A single alphabetic word without a slash is a symbol lookup.
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let trimmed = text.trim();
    let mut parts = trimmed.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return parse_lookup(trimmed);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/ipos" => Ok(TelegramCommand::Upcoming),
        "/gmp" => Ok(TelegramCommand::Predictions),
        "/news" => Ok(TelegramCommand::News),
        "/subscribe" => Ok(TelegramCommand::Subscribe),
        "/unsubscribe" => Ok(TelegramCommand::Unsubscribe),
        "/settings" => Ok(TelegramCommand::Settings),
        "/sip" => parse_sip(parts.collect::<Vec<_>>().as_slice()),
        "/filter" => {
            let field = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("field"))?;
            let value = parts.collect::<Vec<_>>().join(" ");
            if value.is_empty() {
                return Err(CommandParseError::MissingArgument("value"));
            }
            parse_filter(field, &value).map(TelegramCommand::Filter)
        }
        "/time" => {
            let raw = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("time"))?;
            raw.parse::<NotifyTime>()
                .map(TelegramCommand::Time)
                .map_err(|_| CommandParseError::InvalidValue {
                    field: "time",
                    value: raw.to_string(),
                })
        }
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_lookup(text: &str) -> Result<TelegramCommand, CommandParseError> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(TelegramCommand::Lookup(text.to_ascii_uppercase()))
    } else {
        Err(CommandParseError::NotACommand)
    }
}

fn parse_sip(args: &[&str]) -> Result<TelegramCommand, CommandParseError> {
    match args {
        [] => Ok(TelegramCommand::Sip(DEFAULT_SIP)),
        [amount, years, rate, ..] => {
            let amount = amount
                .parse::<u64>()
                .map_err(|_| invalid("amount", amount))?;
            let years = years.parse::<u32>().map_err(|_| invalid("years", years))?;
            let percent = rate
                .trim_end_matches('%')
                .parse::<f64>()
                .map_err(|_| invalid("rate", rate))?;
            Ok(TelegramCommand::Sip(SipArgs {
                amount,
                years,
                rate: percent / 100.0,
            }))
        }
        [_] => Err(CommandParseError::MissingArgument("years")),
        [_, _] => Err(CommandParseError::MissingArgument("rate")),
    }
}

fn parse_filter(field: &str, value: &str) -> Result<FilterUpdate, CommandParseError> {
    let clear = value.eq_ignore_ascii_case("clear") || value.eq_ignore_ascii_case("any");
    match field.to_ascii_lowercase().as_str() {
        "sector" if clear => Ok(FilterUpdate {
            sector: Patch::Clear,
            ..FilterUpdate::default()
        }),
        "sector" => FilterUpdate::sector(value).map_err(|_| invalid("sector", value)),
        "budget" if clear => Ok(FilterUpdate {
            budget: Patch::Clear,
            ..FilterUpdate::default()
        }),
        "budget" => value
            .parse::<BudgetTier>()
            .map(FilterUpdate::budget)
            .map_err(|_| invalid("budget", value)),
        "risk" if clear => Ok(FilterUpdate {
            risk: Patch::Clear,
            ..FilterUpdate::default()
        }),
        "risk" => value
            .parse::<RiskTier>()
            .map(FilterUpdate::risk)
            .map_err(|_| invalid("risk", value)),
        other => Err(CommandParseError::InvalidFilterField(other.to_string())),
    }
}

fn invalid(field: &'static str, value: &str) -> CommandParseError {
    CommandParseError::InvalidValue {
        field,
        value: value.to_string(),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /ipos - 📢 Upcoming IPOs\n\
    /gmp - 📊 GMP and listing gain\n\
    /news - 📰 Market headlines\n\
    /sip [amount years rate%] - 🧮 SIP calculator\n\
    /subscribe - 🔔 Daily IPO alerts\n\
    /unsubscribe - 🔕 Stop daily alerts\n\
    /settings - ⚙️ Current filters\n\
    /filter <sector|budget|risk> <value|clear> - 🎯 Set a filter\n\
    /time HH:MM - ⏰ Preferred alert time\n\n\
    Send a stock symbol (e.g. TCS) for a quote.\n\
    Budget: low, medium, high. Risk: low, moderate, high."
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("ipos", "Upcoming IPOs"),
        ("gmp", "GMP and listing gain"),
        ("news", "Market headlines"),
        ("sip", "SIP calculator"),
        ("subscribe", "Daily IPO alerts"),
        ("unsubscribe", "Stop daily alerts"),
        ("settings", "Current filters"),
        ("filter", "Set a sector, budget or risk filter"),
        ("time", "Preferred alert time"),
        ("help", "Show all commands"),
    ]
}
