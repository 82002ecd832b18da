//! Command-line interface definitions.

pub mod check;
pub mod dispatch;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Result;
use crate::infrastructure::bootstrap::BootstrapOptions;
use crate::infrastructure::config::settings::Config;

/// ipowatch - IPO alerts with scheduled, per-subscriber Telegram digests.
#[derive(Parser, Debug)]
#[command(name = "ipowatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the daily scheduler and the Telegram bot (foreground)
    Run(RunArgs),

    /// Run one dispatch cycle now and print its report
    Dispatch(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `ipowatch check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` and `dispatch` subcommands.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Keep subscriber preferences in memory instead of SQLite
    #[arg(long)]
    pub memory: bool,

    /// Log digests instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Load the config file and apply CLI overrides.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)?;
        if let Some(ref level) = self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        Ok(config)
    }

    #[must_use]
    pub fn options(&self) -> BootstrapOptions {
        BootstrapOptions {
            memory_store: self.memory,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_map_to_options() {
        let cli = Cli::parse_from(["ipowatch", "run", "--memory", "--dry-run", "-c", "x.toml"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        let options = args.options();

        assert!(options.memory_store);
        assert!(options.dry_run);
        assert_eq!(args.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn check_config_defaults_path() {
        let cli = Cli::parse_from(["ipowatch", "check", "config"]);
        let Commands::Check(CheckCommand::Config(arg)) = cli.command else {
            panic!("expected check config");
        };
        assert_eq!(arg.config, PathBuf::from("config.toml"));
    }
}
