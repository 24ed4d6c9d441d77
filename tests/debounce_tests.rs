//! Integration tests for the search debouncer.
//!
//! Tests cover:
//! - Settling to the last value after rapid input
//! - Window restarts on every input, including equal values
//! - Teardown without emission

use std::time::Duration;

use movie_finder::core::debounce::Debouncer;
use tokio::time::{sleep, timeout};

const WINDOW: Duration = Duration::from_millis(100);

#[tokio::test]
async fn test_rapid_inputs_settle_to_last_value_once() {
    let (debouncer, mut settled) = Debouncer::new(WINDOW);

    for term in ["d", "du", "dun", "dune"] {
        debouncer.update(term);
        sleep(Duration::from_millis(10)).await;
    }

    let value = timeout(Duration::from_secs(2), settled.recv())
        .await
        .expect("debouncer should settle")
        .expect("debounce worker alive");
    assert_eq!(value, "dune");

    // Exactly once: nothing else arrives after the burst settles.
    sleep(WINDOW * 3).await;
    assert!(settled.try_recv().is_err());
}

#[tokio::test]
async fn test_no_emission_during_quiescence_window() {
    let (debouncer, mut settled) = Debouncer::new(Duration::from_millis(500));

    debouncer.update("matrix");
    sleep(Duration::from_millis(100)).await;
    assert!(settled.try_recv().is_err());

    // An equal value still restarts the window.
    debouncer.update("matrix");
    sleep(Duration::from_millis(300)).await;
    assert!(settled.try_recv().is_err());

    let value = timeout(Duration::from_secs(2), settled.recv())
        .await
        .expect("debouncer should settle")
        .expect("debounce worker alive");
    assert_eq!(value, "matrix");
}

#[tokio::test]
async fn test_each_settled_burst_emits_independently() {
    let (debouncer, mut settled) = Debouncer::new(WINDOW);

    debouncer.update("alien");
    let first = timeout(Duration::from_secs(2), settled.recv())
        .await
        .expect("first burst settles")
        .expect("debounce worker alive");
    assert_eq!(first, "alien");

    debouncer.update("aliens");
    let second = timeout(Duration::from_secs(2), settled.recv())
        .await
        .expect("second burst settles")
        .expect("debounce worker alive");
    assert_eq!(second, "aliens");
}

#[tokio::test]
async fn test_drop_cancels_pending_emission() {
    let (debouncer, mut settled) = Debouncer::new(WINDOW);

    debouncer.update("inception");
    drop(debouncer);

    sleep(WINDOW * 3).await;
    // The worker is aborted with the handle; the channel just closes.
    assert!(settled.recv().await.is_none());
}
