//! End-to-end dispatch cycles over the SQLite store.

use std::sync::Arc;

use ipowatch::adapter::outbound::sqlite::SqlitePreferenceStore;
use ipowatch::application::aggregator::Aggregator;
use ipowatch::application::dispatch::DispatchCycle;
use ipowatch::application::service::AlertService;
use ipowatch::domain::entity::{Category, Entity, OfferingDetail, PriceBand};
use ipowatch::domain::id::RecipientId;
use ipowatch::domain::subscriber::{BudgetTier, FilterUpdate, RiskTier};
use ipowatch::error::{DeliveryError, StoreError};
use ipowatch::port::outbound::store::PreferenceStore;
use ipowatch::testkit;
use ipowatch::testkit::domain::{offering, priced_offering, risky_offering};
use ipowatch::testkit::source::StaticSource;
use ipowatch::testkit::store::FailingStore;
use ipowatch::testkit::transport::RecordingTransport;
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    store: Arc<SqlitePreferenceStore>,
    source: Arc<StaticSource>,
}

impl Harness {
    fn new(source: StaticSource) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("dispatch.db").to_string_lossy().into_owned();
        let store = Arc::new(SqlitePreferenceStore::open(&url).unwrap());
        Self {
            _dir: dir,
            store,
            source: Arc::new(source),
        }
    }

    fn aggregator(&self) -> Arc<Aggregator> {
        Arc::new(Aggregator::new(3).with_source(self.source.clone()))
    }

    fn service(&self) -> AlertService {
        AlertService::new(self.store.clone(), self.aggregator())
    }

    fn cycle(&self, transport: Arc<RecordingTransport>) -> DispatchCycle {
        DispatchCycle::new(
            self.store.clone(),
            self.aggregator(),
            transport,
            testkit::config::dispatch(3),
        )
    }

    async fn subscribe(&self, ids: &[i64]) {
        let service = self.service();
        for &id in ids {
            service.subscribe(RecipientId::new(id)).await.unwrap();
        }
    }
}

#[tokio::test]
async fn one_blocked_recipient_does_not_stop_the_others() {
    let harness = Harness::new(StaticSource::live(
        Category::Offerings,
        vec![offering("Alpha Ltd"), offering("Beta Ltd")],
    ));
    harness.subscribe(&[1, 2, 3]).await;
    let transport = Arc::new(RecordingTransport::new().failing_for(2, DeliveryError::Unreachable));

    let report = harness.cycle(transport.clone()).run().await.unwrap();

    assert_eq!(report.recipients, 3);
    assert_eq!(report.delivered, vec![RecipientId::new(1), RecipientId::new(3)]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].recipient, RecipientId::new(2));
    assert_eq!(report.failures[0].error, DeliveryError::Unreachable);
    assert_eq!(report.attempted(), 3);
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn all_recipients_in_a_cycle_see_the_same_fetch() {
    let harness = Harness::new(StaticSource::alternating(
        Category::Offerings,
        vec![offering("First Fetch Ltd")],
        vec![offering("Second Fetch Ltd")],
    ));
    harness.subscribe(&[10, 20, 30, 40]).await;
    let transport = Arc::new(RecordingTransport::new());

    harness.cycle(transport.clone()).run().await.unwrap();

    assert_eq!(harness.source.calls(), 1);
    for id in [10, 20, 30, 40] {
        let message = transport.message_for(id).unwrap();
        assert!(message.contains("First Fetch Ltd"), "recipient {id}: {message}");
        assert!(!message.contains("Second Fetch Ltd"));
    }
}

#[tokio::test]
async fn stored_filters_personalize_the_digest() {
    let harness = Harness::new(StaticSource::live(
        Category::Offerings,
        vec![
            risky_offering("Calm Holdings", RiskTier::Moderate),
            risky_offering("Rocket Ventures", RiskTier::High),
        ],
    ));
    harness.subscribe(&[1, 2]).await;
    harness
        .service()
        .update_filters(RecipientId::new(2), FilterUpdate::risk(RiskTier::High))
        .await
        .unwrap();
    let transport = Arc::new(RecordingTransport::new());

    harness.cycle(transport.clone()).run().await.unwrap();

    let unfiltered = transport.message_for(1).unwrap();
    assert!(unfiltered.contains("Calm Holdings"));
    assert!(unfiltered.contains("Rocket Ventures"));

    let filtered = transport.message_for(2).unwrap();
    assert!(!filtered.contains("Calm Holdings"));
    assert!(filtered.contains("Rocket Ventures"));
}

#[tokio::test]
async fn unsubscribed_recipients_are_skipped() {
    let harness = Harness::new(StaticSource::live(
        Category::Offerings,
        vec![offering("Alpha Ltd")],
    ));
    harness.subscribe(&[1, 2]).await;
    harness.service().unsubscribe(RecipientId::new(1)).await.unwrap();
    let transport = Arc::new(RecordingTransport::new());

    let report = harness.cycle(transport.clone()).run().await.unwrap();

    assert_eq!(report.recipients, 1);
    assert!(transport.message_for(1).is_none());
    assert!(transport.message_for(2).is_some());
    assert_eq!(harness.store.list_subscribed().await.unwrap().len(), 1);
}

#[tokio::test]
async fn fallback_cycle_is_reported_as_degraded() {
    let harness = Harness::new(StaticSource::fallback(
        Category::Offerings,
        vec![offering("Green Energy Ltd")],
    ));
    harness.subscribe(&[1]).await;
    let transport = Arc::new(RecordingTransport::new());

    let report = harness.cycle(transport.clone()).run().await.unwrap();

    assert_eq!(report.degraded, vec![Category::Offerings]);
    assert!(report.is_clean());
    assert!(transport.message_for(1).unwrap().contains("Green Energy Ltd"));
}

#[tokio::test]
async fn oversized_price_band_does_not_break_the_cycle() {
    let oversized = Entity::offering(
        "Overflow Ltd",
        OfferingDetail {
            price_band: Some("79228162514264337593543950335".parse::<PriceBand>().unwrap()),
            lot_size: Some(100),
            ..OfferingDetail::default()
        },
    );
    let harness = Harness::new(StaticSource::live(
        Category::Offerings,
        vec![oversized, priced_offering("Steady Ltd", 600, 100)],
    ));
    harness.subscribe(&[1, 2]).await;
    harness
        .service()
        .update_filters(RecipientId::new(1), FilterUpdate::budget(BudgetTier::High))
        .await
        .unwrap();
    let transport = Arc::new(RecordingTransport::new());

    let report = harness.cycle(transport.clone()).run().await.unwrap();

    assert_eq!(report.delivered.len(), 2);
    let budgeted = transport.message_for(1).unwrap();
    assert!(budgeted.contains("Steady Ltd"));
    assert!(!budgeted.contains("Overflow Ltd"));
    assert!(transport.message_for(2).unwrap().contains("Overflow Ltd"));
}

#[tokio::test]
async fn unreadable_store_fails_the_cycle_before_any_send() {
    let source = Arc::new(StaticSource::live(Category::Offerings, vec![offering("Alpha Ltd")]));
    let aggregator = Arc::new(Aggregator::new(3).with_source(source.clone()));
    let transport = Arc::new(RecordingTransport::new());
    let cycle = DispatchCycle::new(
        Arc::new(FailingStore::new()),
        aggregator,
        transport.clone(),
        testkit::config::dispatch(3),
    );

    let result = cycle.run().await;

    assert!(matches!(result, Err(StoreError::Connection(_))));
    assert!(transport.sent().is_empty());
    assert_eq!(source.calls(), 0);
}
