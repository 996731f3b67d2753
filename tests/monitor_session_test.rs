mod common;

use common::{
    BASE_TOKEN, MockPriceSource, OPPORTUNITY_MESSAGE, RecordingNotifier, SILENCE_MESSAGE,
    START_MESSAGE, STOP_MESSAGE, mock_venues, scanner_for,
};
use dex_arb_monitor::{
    CommandError, MonitorParams, MonitorSession, MonitorState, Notifier, Venue,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_secs(60);

fn eth_link_params() -> MonitorParams {
    MonitorParams::new(&["ETH", "LINK"], BASE_TOKEN, INTERVAL, 0.1)
}

fn eth_spread_venues() -> (Arc<MockPriceSource>, Arc<MockPriceSource>) {
    let (venue_a, venue_b) = mock_venues();
    venue_a.set_quote("ETH", 2000.0, 0.0005);
    venue_b.set_quote("ETH", 2100.0, 0.000476);
    (venue_a, venue_b)
}

fn session_with(
    venue_a: &Arc<MockPriceSource>,
    venue_b: &Arc<MockPriceSource>,
    notifier: &Arc<RecordingNotifier>,
) -> MonitorSession {
    MonitorSession::new(
        scanner_for(venue_a, venue_b),
        Arc::clone(notifier) as Arc<dyn Notifier>,
    )
}

async fn wait_for_idle(session: &MonitorSession) {
    for _ in 0..100 {
        if session.status() == MonitorState::Idle {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("Session did not return to Idle, state: {:?}", session.status());
}

#[tokio::test(start_paused = true)]
async fn test_start_stop_lifecycle() {
    println!("\n===== Testing session lifecycle =====");

    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    assert_eq!(session.status(), MonitorState::Idle);

    session.start(eth_link_params()).expect("start should succeed");
    assert_eq!(session.status(), MonitorState::Running);
    assert!(session.is_running());

    tokio::time::sleep(INTERVAL * 3).await;

    session.stop().await.expect("stop should succeed");
    assert_eq!(session.status(), MonitorState::Idle);

    let messages = notifier.messages();
    for message in &messages {
        println!("{}", message);
    }
    assert_eq!(messages.len(), 2, "Only start and stop are expected");
    assert!(messages[0].contains(START_MESSAGE));
    assert!(messages[1].contains(STOP_MESSAGE));
    assert!(venue_a.call_count() >= 3, "The loop should have ticked");
}

#[tokio::test(start_paused = true)]
async fn test_second_start_is_rejected() {
    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    session.start(eth_link_params()).expect("first start");
    let second = session.start(eth_link_params());
    assert_eq!(second, Err(CommandError::AlreadyRunning));

    tokio::time::sleep(INTERVAL * 2).await;
    session.stop().await.expect("stop");

    assert_eq!(notifier.count_containing(START_MESSAGE), 1);
    assert_eq!(notifier.count_containing(STOP_MESSAGE), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_idle_is_rejected() {
    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    assert_eq!(session.stop().await, Err(CommandError::NotRunning));
    assert!(notifier.messages().is_empty(), "Nothing may be sent");
    assert_eq!(session.status(), MonitorState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_single_opportunity() {
    println!("\n===== Testing end-to-end ETH/LINK scenario =====");

    let (venue_a, venue_b) = eth_spread_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    session.start(eth_link_params()).expect("start");

    // Many ticks: ETH stays profitable but is reported only once
    tokio::time::sleep(INTERVAL * 10).await;
    session.stop().await.expect("stop");

    let opportunities: Vec<String> = notifier
        .messages()
        .into_iter()
        .filter(|message| message.contains(OPPORTUNITY_MESSAGE))
        .collect();

    for message in &opportunities {
        println!("{}", message);
    }

    assert_eq!(opportunities.len(), 1, "Exactly one opportunity notification");
    assert!(opportunities[0].contains("Token to trade: ETH"));
    assert!(opportunities[0].contains("Profit: 5.00%"));
    assert!(opportunities[0].contains("Uniswap Price (USDT->ETH): 2000"));
    assert!(opportunities[0].contains("SushiSwap Price (USDT->ETH): 2100"));
}

#[tokio::test(start_paused = true)]
async fn test_silence_reported_during_long_run() {
    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    let params = eth_link_params().with_silence_interval(INTERVAL * 5);
    session.start(params).expect("start");

    tokio::time::sleep(INTERVAL * 5 + Duration::from_secs(30)).await;
    session.stop().await.expect("stop");

    assert_eq!(notifier.count_containing(SILENCE_MESSAGE), 1);
    assert_eq!(notifier.count_containing(OPPORTUNITY_MESSAGE), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_token_stops_loop() {
    let (venue_a, venue_b) = eth_spread_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let shutdown = CancellationToken::new();
    let session = MonitorSession::with_shutdown(
        scanner_for(&venue_a, &venue_b),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        shutdown.clone(),
    );

    session.start(eth_link_params()).expect("start");
    tokio::time::sleep(INTERVAL * 2).await;

    shutdown.cancel();
    wait_for_idle(&session).await;

    assert_eq!(notifier.count_containing(STOP_MESSAGE), 1);
    assert_eq!(session.stop().await, Err(CommandError::NotRunning));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_stop_notification() {
    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    session.start(eth_link_params()).expect("start");
    tokio::time::sleep(INTERVAL).await;

    session.shutdown().await;

    assert_eq!(session.status(), MonitorState::Idle);
    assert_eq!(notifier.count_containing(STOP_MESSAGE), 1);

    // Idle shutdown is a no-op
    session.shutdown().await;
    assert_eq!(notifier.count_containing(STOP_MESSAGE), 1);
}

#[tokio::test(start_paused = true)]
async fn test_restart_uses_fresh_dedup() {
    let (venue_a, venue_b) = eth_spread_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    session.start(eth_link_params()).expect("first start");
    tokio::time::sleep(INTERVAL * 2).await;
    session.stop().await.expect("first stop");

    session.start(eth_link_params()).expect("second start");
    tokio::time::sleep(INTERVAL * 2).await;
    session.stop().await.expect("second stop");

    assert_eq!(
        notifier.count_containing(OPPORTUNITY_MESSAGE),
        2,
        "ETH is reported once per session"
    );
    assert_eq!(notifier.count_containing(START_MESSAGE), 2);
    assert_eq!(notifier.count_containing(STOP_MESSAGE), 2);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_params_are_rejected() {
    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    let empty_tokens = MonitorParams::new(&[], BASE_TOKEN, INTERVAL, 0.1);
    let zero_interval = MonitorParams::new(&["ETH"], BASE_TOKEN, Duration::ZERO, 0.1);
    let negative_profit = MonitorParams::new(&["ETH"], BASE_TOKEN, INTERVAL, -1.0);
    let empty_base = MonitorParams::new(&["ETH"], "", INTERVAL, 0.1);

    for params in [empty_tokens, zero_interval, negative_profit, empty_base] {
        let result = session.start(params.clone());
        println!("{:?} -> {:?}", params, result);
        assert!(matches!(result, Err(CommandError::InvalidParams(_))));
    }

    assert_eq!(session.status(), MonitorState::Idle);
    assert!(notifier.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_delivery_failure_keeps_loop_running() {
    let (venue_a, venue_b) = eth_spread_venues();
    let notifier = Arc::new(RecordingNotifier::failing());
    let session = session_with(&venue_a, &venue_b, &notifier);

    session.start(eth_link_params()).expect("start");
    tokio::time::sleep(INTERVAL * 3).await;

    assert!(session.is_running(), "Failed deliveries must not end the session");
    assert!(venue_a.call_count() >= 3);

    session.stop().await.expect("stop");
    assert_eq!(notifier.count_containing(OPPORTUNITY_MESSAGE), 1);
    assert_eq!(notifier.count_containing(STOP_MESSAGE), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_interrupts_slow_scan() {
    println!("\n===== Testing stop during an in-flight scan =====");

    let venue_a = Arc::new(
        MockPriceSource::new(Venue::Uniswap).with_latency(Duration::from_secs(60 * 60)),
    );
    let venue_b = Arc::new(
        MockPriceSource::new(Venue::SushiSwap).with_latency(Duration::from_secs(60 * 60)),
    );
    venue_a.set_quote("ETH", 2000.0, 0.0005);
    venue_b.set_quote("ETH", 2100.0, 0.000476);

    let notifier = Arc::new(RecordingNotifier::new());
    let session = session_with(&venue_a, &venue_b, &notifier);

    session.start(eth_link_params()).expect("start");
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(venue_a.queried("ETH"), "The scan should be waiting on quotes");

    let stop_requested = Instant::now();
    session.stop().await.expect("stop");
    let waited = stop_requested.elapsed();
    println!("stop took {:?}", waited);

    assert!(
        waited < Duration::from_secs(1),
        "stop must not wait for the scan to finish, waited {:?}",
        waited
    );
    assert_eq!(session.status(), MonitorState::Idle);

    let messages = notifier.messages();
    assert_eq!(messages.len(), 2, "Only start and stop are expected: {:?}", messages);
    assert!(messages[0].contains(START_MESSAGE));
    assert!(messages[1].contains(STOP_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_stop_lets_inflight_delivery_finish() {
    println!("\n===== Testing stop during an opportunity delivery =====");

    let delivery = Duration::from_secs(30);
    let (venue_a, venue_b) = eth_spread_venues();
    let notifier = Arc::new(RecordingNotifier::with_latency(delivery));
    let session = session_with(&venue_a, &venue_b, &notifier);

    let started = Instant::now();
    session.start(eth_link_params()).expect("start");

    // Start message lands at +30s, the opportunity delivery runs until +60s
    tokio::time::sleep(Duration::from_secs(45)).await;
    assert_eq!(notifier.count_containing(OPPORTUNITY_MESSAGE), 0);

    session.stop().await.expect("stop");
    println!("stop returned at +{:?}", started.elapsed());

    let messages = notifier.messages();
    for message in &messages {
        println!("{}", message);
    }
    assert_eq!(messages.len(), 3, "start, opportunity and stop: {:?}", messages);
    assert!(messages[0].contains(START_MESSAGE));
    assert!(messages[1].contains(OPPORTUNITY_MESSAGE));
    assert!(messages[2].contains(STOP_MESSAGE));
    assert!(started.elapsed() >= 3 * delivery);
    assert_eq!(session.status(), MonitorState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_concurrent_stop() {
    let (venue_a, venue_b) = mock_venues();
    let notifier = Arc::new(RecordingNotifier::with_latency(Duration::from_secs(30)));
    let session = Arc::new(session_with(&venue_a, &venue_b, &notifier));

    session.start(eth_link_params()).expect("start");
    tokio::time::sleep(INTERVAL * 2).await;

    let stopper = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.stop().await })
    };
    while session.status() != MonitorState::Stopping {
        tokio::task::yield_now().await;
    }

    // The stop notification is still being delivered
    session.shutdown().await;

    assert_eq!(session.status(), MonitorState::Idle);
    assert_eq!(notifier.count_containing(STOP_MESSAGE), 1);
    assert_eq!(stopper.await.expect("stop task"), Ok(()));
}
