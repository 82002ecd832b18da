//! Aggregation across sources, truncation and fallback behavior.

use std::sync::Arc;

use ipowatch::application::aggregator::Aggregator;
use ipowatch::domain::entity::Category;
use ipowatch::port::outbound::source::FetchParams;
use ipowatch::testkit::domain::{headline, offering};
use ipowatch::testkit::source::StaticSource;

fn offerings(n: usize) -> Vec<ipowatch::domain::entity::Entity> {
    (0..n).map(|i| offering(&format!("IPO {i}"))).collect()
}

#[tokio::test]
async fn aggregate_truncates_to_max_batch_size() {
    let aggregator = Aggregator::new(5)
        .with_source(Arc::new(StaticSource::live(Category::Offerings, offerings(8))));

    let set = aggregator
        .aggregate(&[Category::Offerings], &FetchParams::default())
        .await;

    assert_eq!(set.len(), 5);
    assert_eq!(set.entities()[0].name, "IPO 0");
    assert_eq!(set.entities()[4].name, "IPO 4");
    assert!(!set.is_degraded());
}

#[tokio::test]
async fn collect_keeps_full_pool() {
    let aggregator = Aggregator::new(2)
        .with_source(Arc::new(StaticSource::live(Category::Offerings, offerings(6))));

    let set = aggregator
        .collect(&[Category::Offerings], &FetchParams::default())
        .await;

    assert_eq!(set.len(), 6);
}

#[tokio::test]
async fn categories_are_fetched_once_each() {
    let source = Arc::new(StaticSource::live(Category::Offerings, offerings(1)));
    let aggregator = Aggregator::new(3)
        .with_source(source.clone())
        .with_source(Arc::new(StaticSource::live(
            Category::Headlines,
            vec![headline("Markets steady")],
        )));

    let set = aggregator
        .collect(
            &[Category::Headlines, Category::Offerings, Category::Offerings],
            &FetchParams::default(),
        )
        .await;

    assert_eq!(source.calls(), 1);
    assert_eq!(set.len(), 2);
}

#[tokio::test]
async fn degraded_categories_are_tracked() {
    let aggregator = Aggregator::new(3)
        .with_source(Arc::new(StaticSource::fallback(Category::Offerings, offerings(2))))
        .with_source(Arc::new(StaticSource::live(
            Category::Headlines,
            vec![headline("Markets steady")],
        )));

    let set = aggregator
        .collect(&[Category::Offerings, Category::Headlines], &FetchParams::default())
        .await;

    assert_eq!(set.degraded(), &[Category::Offerings]);
    assert_eq!(set.entities().iter().filter(|e| e.is_fallback()).count(), 2);
}

#[tokio::test]
async fn unregistered_category_yields_nothing() {
    let aggregator = Aggregator::new(3);

    let set = aggregator
        .aggregate(&[Category::Quotes], &FetchParams::symbols(["TCS"]))
        .await;

    assert!(set.is_empty());
}
