//! Configuration validation command.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::fallback::load_fallback;
use crate::infrastructure::config::settings::Config;

/// Validate configuration file without starting the bot.
///
/// # Errors
/// Returns the load, validation or fallback table error.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());
    println!();

    let config = Config::load(path)?;
    let fallback = load_fallback(config.sources.fallback_path.as_deref())?;
    let schedule = config.dispatch.schedule()?;

    println!("✓ Configuration file is valid");
    println!();
    println!("Summary:");
    println!("  Database: {}", config.database);
    println!(
        "  Daily dispatch: {} (UTC{:+}min)",
        schedule.at().format("%H:%M"),
        config.dispatch.utc_offset_minutes
    );
    println!("  Max batch size: {}", config.dispatch.max_batch_size);
    let categories: Vec<&str> = config.dispatch.categories.iter().map(|c| c.as_str()).collect();
    println!("  Categories: {}", categories.join(", "));
    println!("  Fallback entries: {}", fallback.len());
    println!();

    if config.sources.news_api_key.is_some() {
        println!("✓ News API key found (from NEWSAPI_KEY env var)");
    } else {
        println!("⚠ NEWSAPI_KEY not set, headlines will use fallback data");
    }

    if config.telegram.enabled {
        if config.telegram.bot_token.is_some() {
            println!("✓ Telegram configured and enabled");
        } else {
            println!("⚠ Telegram enabled but TELEGRAM_BOT_TOKEN is not set");
        }
    } else {
        println!("  Telegram: disabled (digests are logged)");
    }

    println!();
    println!("Configuration is ready to use.");
    Ok(())
}
