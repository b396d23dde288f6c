//! Estimator source against a local websocket server.

use std::time::Duration;

use futures_util::SinkExt;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tokio_tungstenite::tungstenite::Message;

use dwellpad::adapters::EstimatorSource;
use dwellpad::config::EstimatorConfig;
use dwellpad::error::SampleError;
use dwellpad::sample::{RawSample, TimedSample};
use dwellpad::traits::{PositionSource, SourceState};

/// Accept one connection, wait for `go`, send `frames`, then close.
async fn serve_once(frames: Vec<&'static str>) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}/ws", listener.local_addr().unwrap());
    let (go_tx, go_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
        let _ = go_rx.await;
        for frame in frames {
            ws.send(Message::Text(frame.to_string())).await.unwrap();
        }
        let _ = ws.close(None).await;
    });

    (url, go_tx)
}

async fn next_sample(rx: &mut broadcast::Receiver<TimedSample>) -> TimedSample {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap()
}

fn config(url: &str) -> EstimatorConfig {
    EstimatorConfig::default()
        .with_url(url)
        .with_max_retries(1)
        .with_max_backoff_secs(1)
}

#[tokio::test]
async fn test_estimator_forwards_positions() {
    let (url, go) = serve_once(vec![
        r#"{"x": 0.25, "y": 0.5}"#,
        "not json",
        r#"["calibrated", {}]"#,
        r#"["response", {"x": 0.75, "y": 0.125}]"#,
        r#"{"x": null, "y": 0.5}"#,
    ])
    .await;

    let source = EstimatorSource::connect(config(&url)).await.unwrap();
    assert!(source.is_connected());
    let mut samples = source.subscribe();
    go.send(()).unwrap();

    let first = next_sample(&mut samples).await;
    assert_eq!(first.payload, Ok(RawSample::new(0.25, 0.5)));

    // Garbage and other events are skipped
    let second = next_sample(&mut samples).await;
    assert_eq!(second.payload, Ok(RawSample::new(0.75, 0.125)));

    let third = next_sample(&mut samples).await;
    assert!(matches!(third.payload, Err(SampleError::NonNumeric { field: "x" })));

    source.shutdown();
}

#[tokio::test]
async fn test_estimator_reports_lost_connection() {
    let (url, go) = serve_once(vec![]).await;

    let source = EstimatorSource::connect(config(&url)).await.unwrap();
    let mut state = source.state();
    go.send(()).unwrap();

    let lost = tokio::time::timeout(
        Duration::from_secs(5),
        state.wait_for(|s| *s != SourceState::Connected),
    )
    .await
    .is_ok();
    assert!(lost);

    source.shutdown();
}

#[tokio::test]
async fn test_estimator_shutdown_disconnects() {
    let (url, _go) = serve_once(vec![]).await;

    let source = EstimatorSource::connect(config(&url)).await.unwrap();
    let mut state = source.state();
    source.shutdown();

    let stopped = tokio::time::timeout(
        Duration::from_secs(5),
        state.wait_for(|s| *s == SourceState::Disconnected),
    )
    .await
    .is_ok();
    assert!(stopped);
    assert!(!source.is_connected());
}
