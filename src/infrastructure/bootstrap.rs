//! Composition root: builds adapters from configuration and wires the
//! application services together.

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::outbound::memory::MemoryPreferenceStore;
use crate::adapter::outbound::notifier::LogTransport;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{bot, TelegramControl, TelegramTransport};
use crate::adapter::outbound::source::{
    HeadlineSource, OfferingSource, ProviderClient, QuoteSource, ResilientSource,
};
use crate::adapter::outbound::sqlite::SqlitePreferenceStore;
use crate::application::aggregator::Aggregator;
use crate::application::dispatch::{CycleReport, DispatchCycle};
use crate::application::scheduler::{DailySchedule, Scheduler};
use crate::application::service::AlertService;
use crate::error::Result;
use crate::infrastructure::config::fallback::load_fallback;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::PreferenceStore;
use crate::port::outbound::transport::Transport;

/// Wiring choices not carried by the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapOptions {
    /// Keep preferences in memory instead of SQLite.
    pub memory_store: bool,
    /// Log digests instead of sending them.
    pub dry_run: bool,
}

/// Build the preference store.
///
/// # Errors
/// Returns a store error if the database cannot be opened or migrated.
pub fn build_store(config: &Config, options: BootstrapOptions) -> Result<Arc<dyn PreferenceStore>> {
    if options.memory_store {
        info!("Using in-memory preference store");
        return Ok(Arc::new(MemoryPreferenceStore::new()));
    }
    let store = SqlitePreferenceStore::open(&config.database)?;
    info!(database = %config.database, "Preference store ready");
    Ok(Arc::new(store))
}

/// Build the aggregator with every provider wrapped in its fallback.
///
/// Registration order (offerings, quotes, headlines) is digest order.
///
/// # Errors
/// Returns a config error for bad URLs or an unreadable fallback table.
pub fn build_aggregator(config: &Config) -> Result<Aggregator> {
    let fallback = Arc::new(load_fallback(config.sources.fallback_path.as_deref())?);
    let timeout = config.dispatch.fetch_timeout();
    let client = ProviderClient::new(timeout);

    if config.sources.news_api_key.is_none() {
        warn!("NEWSAPI_KEY not set, headlines will use fallback data");
    }

    let offerings = OfferingSource::new(client.clone(), config.sources.offerings()?);
    let quotes = QuoteSource::new(
        client.clone(),
        config.sources.quotes()?,
        config.sources.quote_suffix.clone(),
    );
    let headlines = HeadlineSource::new(
        client,
        config.sources.news()?,
        config.sources.news_api_key.clone(),
    );

    Ok(Aggregator::new(config.dispatch.max_batch_size)
        .with_source(Arc::new(ResilientSource::new(offerings, Arc::clone(&fallback), timeout)))
        .with_source(Arc::new(ResilientSource::new(quotes, Arc::clone(&fallback), timeout)))
        .with_source(Arc::new(ResilientSource::new(headlines, fallback, timeout))))
}

/// Build the outbound transport.
///
/// Falls back to [`LogTransport`] when Telegram is disabled, unavailable in
/// this build, or has no token.
#[must_use]
pub fn build_transport(config: &Config, options: BootstrapOptions) -> Arc<dyn Transport> {
    if options.dry_run || !config.telegram.enabled {
        info!("Digests will be logged, not sent");
        return Arc::new(LogTransport);
    }

    #[cfg(feature = "telegram")]
    {
        if let Some(token) = &config.telegram.bot_token {
            info!("Telegram transport enabled");
            return Arc::new(TelegramTransport::new(teloxide::Bot::new(token)));
        }
    }

    warn!("Telegram enabled but TELEGRAM_BOT_TOKEN not set or feature disabled, logging digests");
    Arc::new(LogTransport)
}

/// Fully wired application.
pub struct App {
    config: Config,
    schedule: DailySchedule,
    service: AlertService,
    cycle: Arc<DispatchCycle>,
}

impl App {
    /// Wire every component from `config`.
    ///
    /// # Errors
    /// Returns an error if the schedule is invalid, the store cannot be
    /// opened, or a source cannot be configured.
    pub fn build(config: Config, options: BootstrapOptions) -> Result<Self> {
        let schedule = config.dispatch.schedule()?;
        let store = build_store(&config, options)?;
        let aggregator = Arc::new(build_aggregator(&config)?);
        let transport = build_transport(&config, options);

        let service = AlertService::new(Arc::clone(&store), Arc::clone(&aggregator));
        let cycle = Arc::new(DispatchCycle::new(
            store,
            aggregator,
            transport,
            config.dispatch.to_dispatch_config(),
        ));

        Ok(Self {
            config,
            schedule,
            service,
            cycle,
        })
    }

    #[must_use]
    pub fn service(&self) -> &AlertService {
        &self.service
    }

    /// Run a single dispatch cycle now.
    ///
    /// # Errors
    /// Returns the store error that aborted the cycle.
    pub async fn dispatch_once(&self) -> Result<CycleReport> {
        Ok(self.cycle.run().await?)
    }

    /// Run the scheduler and the command listener until Ctrl-C.
    pub async fn run(self) {
        info!(
            at = %self.schedule.at(),
            utc_offset_minutes = self.config.dispatch.utc_offset_minutes,
            "ipowatch starting"
        );
        let handle = Scheduler::new(self.schedule).start(Arc::clone(&self.cycle));

        self.listen().await;

        handle.stop().await;
        info!("ipowatch stopped");
    }

    #[cfg(feature = "telegram")]
    async fn listen(&self) {
        match (&self.config.telegram.bot_token, self.config.telegram.enabled) {
            (Some(token), true) => {
                let control = TelegramControl::new(self.service.clone());
                bot::run_command_listener(teloxide::Bot::new(token), control).await;
            }
            _ => wait_for_shutdown().await,
        }
    }

    #[cfg(not(feature = "telegram"))]
    async fn listen(&self) {
        wait_for_shutdown().await;
    }
}

async fn wait_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    info!("Shutdown signal received (Ctrl+C)");
}
