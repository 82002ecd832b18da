//! Telegram delivery and command handling.
//!
//! [`transport::TelegramTransport`] delivers digests; [`bot`] runs the
//! command listener that drives [`control::TelegramControl`].

mod command;

pub mod bot;
pub mod control;
pub mod transport;

pub use control::TelegramControl;
pub use transport::TelegramTransport;
