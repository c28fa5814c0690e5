use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use cdms_gateway_stub::application::services::DelaySimulator;
use cdms_gateway_stub::domain::DelayConfig;

fn simulator(entries: &[(&str, u64)]) -> Arc<DelaySimulator> {
    let config = DelayConfig::from_millis(entries.iter().copied()).unwrap();
    Arc::new(DelaySimulator::new(Arc::new(config)))
}

#[tokio::test(start_paused = true)]
async fn given_configured_route_when_simulating_then_waits_full_delay() {
    let simulator = simulator(&[("/orders", 500)]);

    let start = Instant::now();
    let applied = simulator.simulate("GET", "/orders").await;

    assert_eq!(applied, Duration::from_millis(500));
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn given_unconfigured_route_when_simulating_then_returns_immediately() {
    let simulator = simulator(&[("/orders", 500)]);

    let start = Instant::now();
    let applied = simulator.simulate("GET", "/customs").await;

    assert_eq!(applied, Duration::ZERO);
    assert!(start.elapsed() < Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn given_concurrent_delays_when_simulating_then_total_time_is_the_longest_delay() {
    let simulator = simulator(&[("/a", 100), ("/b", 200), ("/c", 300)]);

    let start = Instant::now();
    let applied = futures::future::join_all(
        ["/a", "/b", "/c"].map(|path| simulator.simulate("GET", path)),
    )
    .await;

    let elapsed = start.elapsed();
    assert_eq!(applied.iter().sum::<Duration>(), Duration::from_millis(600));
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn given_pending_delay_when_task_aborted_then_future_is_dropped_before_completion() {
    let simulator = simulator(&[("/orders", 5_000)]);

    let task = tokio::spawn({
        let simulator = Arc::clone(&simulator);
        async move { simulator.simulate("GET", "/orders").await }
    });
    tokio::time::advance(Duration::from_millis(100)).await;
    task.abort();

    let result = task.await;

    assert!(result.unwrap_err().is_cancelled());
    assert_eq!(Arc::strong_count(&simulator), 1);
}

#[test]
fn given_simulator_when_querying_delay_then_does_not_wait() {
    let simulator = simulator(&[("PUT /orders", 42)]);

    assert_eq!(simulator.delay_for("PUT", "/orders"), Duration::from_millis(42));
    assert_eq!(simulator.config().len(), 1);
}
