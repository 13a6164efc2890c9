mod util;

use std::{sync::atomic::Ordering, time::Duration};

use tokio_util::sync::CancellationToken;
use util::{CollectingSink, FailingSink, ScriptedProvider};
use window_time::{
    ActiveWindowReceiver, ChannelTicker, ReceiverConfig, ScrapeController, WINDOW_TIME_METRIC,
    WindowKey,
};

fn config() -> ReceiverConfig {
    ReceiverConfig {
        collection_interval: Duration::from_secs(10),
        initial_delay: Duration::from_secs(1),
        precision: Duration::from_secs(1),
        ..ReceiverConfig::default()
    }
}

fn receiver() -> ActiveWindowReceiver<ScriptedProvider> {
    ActiveWindowReceiver::with_providers(config(), vec![ScriptedProvider::always("0x1", "App One")])
        .unwrap()
}

#[tokio::test]
async fn empty_receiver_delivers_nothing() {
    let receiver = receiver();
    let controller = ScrapeController::new(&config(), CollectingSink::default());

    assert!(!controller.scrape_once(&receiver).await);
    assert!(controller.sink().batches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivers_one_batch_per_tick() {
    let receiver = receiver();
    receiver
        .aggregator()
        .record(WindowKey::new("0x1", "App One"), Duration::from_secs(3));
    let controller = ScrapeController::new(&config(), CollectingSink::default());

    let (handle, ticker) = ChannelTicker::pair();
    handle.tick_n(2);
    drop(handle);
    controller
        .run_with_ticker(&receiver, ticker, CancellationToken::new())
        .await;

    let batches = controller.sink().batches.lock().unwrap();
    assert_eq!(batches.len(), 2);
    for batch in batches.iter() {
        let metric = batch.metric(WINDOW_TIME_METRIC).unwrap();
        assert_eq!(metric.data_points.len(), 1);
        assert_eq!(metric.data_points[0].value, 3.0);
        assert_eq!(metric.data_points[0].attributes["window.app"], "App One");
    }
}

#[tokio::test]
async fn sink_failures_do_not_stop_scraping() {
    let receiver = receiver();
    receiver
        .aggregator()
        .record(WindowKey::new("0x1", "App One"), Duration::from_secs(1));
    let controller = ScrapeController::new(&config(), FailingSink::default());

    let (handle, ticker) = ChannelTicker::pair();
    handle.tick_n(3);
    drop(handle);
    controller
        .run_with_ticker(&receiver, ticker, CancellationToken::new())
        .await;

    assert_eq!(controller.sink().attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn cancelled_controller_stops() {
    let receiver = receiver();
    receiver
        .aggregator()
        .record(WindowKey::new("0x1", "App One"), Duration::from_secs(1));
    let controller = ScrapeController::new(&config(), CollectingSink::default());

    let (handle, ticker) = ChannelTicker::pair();
    handle.tick_n(3);
    let cancel = CancellationToken::new();
    cancel.cancel();
    controller.run_with_ticker(&receiver, ticker, cancel).await;

    assert!(controller.sink().batches.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn scrapes_after_initial_delay_then_on_interval() {
    let receiver = receiver();
    receiver
        .aggregator()
        .record(WindowKey::new("0x1", "App One"), Duration::from_secs(1));
    let controller = ScrapeController::new(&config(), CollectingSink::default());
    let cancel = CancellationToken::new();

    let stop = cancel.clone();
    tokio::join!(controller.run(&receiver, cancel), async move {
        // initial delay (1s) + two collection intervals (10s each)
        tokio::time::sleep(Duration::from_millis(21_500)).await;
        stop.cancel();
    });

    assert_eq!(controller.sink().batches.lock().unwrap().len(), 3);
}
