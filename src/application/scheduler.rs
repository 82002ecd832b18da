//! Daily trigger for the dispatch cycle.
//!
//! The scheduler owns one background task. It sleeps until the next wall-clock
//! trigger, runs a cycle, and repeats until stopped.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveTime, TimeZone, Utc};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::dispatch::DispatchCycle;
use crate::error::ConfigError;

/// A fixed time of day in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
    offset: FixedOffset,
}

impl DailySchedule {
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an out-of-range hour, minute
    /// or offset.
    pub fn new(hour: u32, minute: u32, utc_offset_minutes: i32) -> Result<Self, ConfigError> {
        let at = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| ConfigError::InvalidValue {
            field: "dispatch.notify_hour/notify_minute",
            reason: format!("{hour:02}:{minute:02} is not a time of day"),
        })?;
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "dispatch.utc_offset_minutes",
                reason: format!("{utc_offset_minutes} is out of range"),
            })?;
        Ok(Self { at, offset })
    }

    #[must_use]
    pub fn at(&self) -> NaiveTime {
        self.at
    }

    /// First trigger strictly after `now`.
    #[must_use]
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = now.with_timezone(&self.offset);
        let shift = ChronoDuration::seconds(i64::from(self.offset.local_minus_utc()));
        let mut candidate = Utc.from_utc_datetime(&(local.date_naive().and_time(self.at) - shift));
        while candidate <= now {
            candidate += ChronoDuration::days(1);
        }
        candidate
    }
}

/// Runs [`DispatchCycle`]s on a [`DailySchedule`].
pub struct Scheduler {
    schedule: DailySchedule,
}

impl Scheduler {
    #[must_use]
    pub fn new(schedule: DailySchedule) -> Self {
        Self { schedule }
    }

    /// Spawn the trigger loop.
    #[must_use]
    pub fn start(self, cycle: Arc<DispatchCycle>) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let schedule = self.schedule;

        let task = tokio::spawn(async move {
            // Advances by whole triggers so a fast clock never fires twice.
            let mut cursor = Utc::now();
            loop {
                let next = schedule.next_after(cursor);
                let wait = (next - Utc::now()).to_std().unwrap_or_default();
                info!(next_run = %next, "Next dispatch scheduled");

                tokio::select! {
                    () = tokio::time::sleep(wait) => {}
                    _ = &mut shutdown_rx => {
                        info!("Scheduler stopping");
                        break;
                    }
                }

                match cycle.run().await {
                    Ok(report) => info!(
                        cycle_id = %report.cycle_id,
                        delivered = report.delivered.len(),
                        failed = report.failures.len(),
                        "Scheduled dispatch finished"
                    ),
                    Err(e) => error!(error = %e, "Scheduled dispatch failed"),
                }
                cursor = next;
            }
        });

        SchedulerHandle {
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }
}

/// Controls a running [`Scheduler`].
pub struct SchedulerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop after any in-flight cycle finishes.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            error!(error = %e, "Scheduler task join failed");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryPreferenceStore;
    use crate::application::aggregator::Aggregator;
    use crate::domain::entity::Category;
    use crate::domain::id::RecipientId;
    use crate::port::outbound::store::PreferenceStore;
    use crate::testkit;
    use crate::testkit::domain::offering;
    use crate::testkit::source::StaticSource;
    use crate::testkit::transport::RecordingTransport;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn next_after_same_day_in_offset() {
        // 09:00 IST is 03:30 UTC.
        let schedule = DailySchedule::new(9, 0, 330).unwrap();
        let next = schedule.next_after(utc("2025-09-01T01:00:00Z"));
        assert_eq!(next, utc("2025-09-01T03:30:00Z"));
    }

    #[test]
    fn next_after_rolls_to_tomorrow() {
        let schedule = DailySchedule::new(9, 0, 330).unwrap();
        let next = schedule.next_after(utc("2025-09-01T03:30:00Z"));
        assert_eq!(next, utc("2025-09-02T03:30:00Z"));
    }

    #[test]
    fn next_after_crosses_local_midnight() {
        // 23:00 UTC is already the next local day in IST.
        let schedule = DailySchedule::new(9, 0, 330).unwrap();
        let next = schedule.next_after(utc("2025-09-01T23:00:00Z"));
        assert_eq!(next, utc("2025-09-02T03:30:00Z"));
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        assert!(DailySchedule::new(24, 0, 0).is_err());
        assert!(DailySchedule::new(9, 60, 0).is_err());
        assert!(DailySchedule::new(9, 0, 24 * 60).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_runs_cycle_and_stops() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.ensure(RecipientId::new(7)).await.unwrap();
        store.set_subscribed(RecipientId::new(7), true).await.unwrap();
        let aggregator = Arc::new(
            Aggregator::new(3).with_source(Arc::new(StaticSource::live(
                Category::Offerings,
                vec![offering("Green Energy Ltd")],
            ))),
        );
        let transport = Arc::new(RecordingTransport::new());
        let cycle = Arc::new(DispatchCycle::new(
            store,
            aggregator,
            transport.clone(),
            testkit::config::dispatch(3),
        ));

        let handle = Scheduler::new(DailySchedule::new(9, 0, 330).unwrap()).start(cycle);
        tokio::time::sleep(std::time::Duration::from_secs(25 * 3600)).await;
        handle.stop().await;

        assert!(!transport.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_trigger_sends_nothing() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let aggregator = Arc::new(Aggregator::new(3));
        let transport = Arc::new(RecordingTransport::new());
        let cycle = Arc::new(DispatchCycle::new(
            store,
            aggregator,
            transport.clone(),
            testkit::config::dispatch(3),
        ));

        let handle = Scheduler::new(DailySchedule::new(9, 0, 330).unwrap()).start(cycle);
        handle.stop().await;

        assert!(transport.sent().is_empty());
    }
}
