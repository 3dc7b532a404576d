//! Tests for the auto-publish scheduler

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use sparkplug_edge::{AutoPublisher, Error, DEFAULT_INTERVAL};

#[test]
fn test_default_interval_is_five_seconds() {
    assert_eq!(DEFAULT_INTERVAL, Duration::from_secs(5));
    assert_eq!(AutoPublisher::new().interval(), Duration::from_secs(5));
}

#[test]
fn test_stop_while_idle_is_noop() {
    let mut auto = AutoPublisher::new();
    assert!(!auto.is_running());
    auto.stop();
    assert!(!auto.is_running(), "stop while idle leaves state idle");
}

#[test]
fn test_start_then_stop_within_one_interval() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut auto = AutoPublisher::with_interval(Duration::from_millis(200));

    let ticks = Arc::clone(&count);
    auto.start(move || {
        ticks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    assert!(auto.is_running());

    thread::sleep(Duration::from_millis(50));
    auto.stop();
    assert!(!auto.is_running());

    // The first iteration runs immediately; the second never gets scheduled.
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_runs_once_per_interval() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut auto = AutoPublisher::with_interval(Duration::from_millis(50));

    let ticks = Arc::clone(&count);
    auto.start(move || {
        ticks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    // ~4 intervals plus slack; boundary timing allows one either way.
    thread::sleep(Duration::from_millis(210));
    auto.stop();

    let observed = count.load(Ordering::SeqCst);
    assert!(
        (4..=6).contains(&observed),
        "expected about 5 ticks, got {observed}"
    );
}

#[test]
fn test_stop_takes_effect_without_interval_latency() {
    let mut auto = AutoPublisher::with_interval(Duration::from_secs(60));
    auto.start(|| Ok(()));

    thread::sleep(Duration::from_millis(20));
    let started = Instant::now();
    auto.stop();

    assert!(
        started.elapsed() < Duration::from_secs(1),
        "stop must not wait out the interval"
    );
}

#[test]
fn test_reentrant_start_keeps_single_worker() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut auto = AutoPublisher::with_interval(Duration::from_millis(50));

    for _ in 0..3 {
        let ticks = Arc::clone(&count);
        auto.start(move || {
            ticks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    thread::sleep(Duration::from_millis(120));
    auto.stop();

    // Three workers would roughly triple the tick rate.
    let observed = count.load(Ordering::SeqCst);
    assert!(
        (2..=4).contains(&observed),
        "expected a single worker's tick count, got {observed}"
    );
}

#[test]
fn test_failed_iteration_does_not_kill_loop() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut auto = AutoPublisher::with_interval(Duration::from_millis(30));

    let ticks = Arc::clone(&count);
    auto.start(move || {
        ticks.fetch_add(1, Ordering::SeqCst);
        Err(Error::PublishFailed {
            message_type: "DBIRTH",
            details: "broker unreachable".to_string(),
        })
    });

    thread::sleep(Duration::from_millis(130));
    auto.stop();

    assert!(
        count.load(Ordering::SeqCst) >= 3,
        "loop must keep running after failed iterations"
    );
}

#[test]
fn test_restart_after_stop() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut auto = AutoPublisher::with_interval(Duration::from_millis(50));

    let ticks = Arc::clone(&count);
    auto.start(move || {
        ticks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    thread::sleep(Duration::from_millis(20));
    auto.stop();

    let after_first = count.load(Ordering::SeqCst);
    assert_eq!(after_first, 1);

    let ticks = Arc::clone(&count);
    auto.start(move || {
        ticks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    assert!(auto.is_running());
    thread::sleep(Duration::from_millis(20));
    auto.stop();

    assert_eq!(count.load(Ordering::SeqCst), after_first + 1);
}

#[test]
fn test_values_read_fresh_each_iteration() {
    let source = Arc::new(AtomicUsize::new(1));
    let seen = Arc::new(AtomicUsize::new(0));
    let mut auto = AutoPublisher::with_interval(Duration::from_millis(40));

    let source_in_tick = Arc::clone(&source);
    let seen_in_tick = Arc::clone(&seen);
    auto.start(move || {
        seen_in_tick.store(source_in_tick.load(Ordering::SeqCst), Ordering::SeqCst);
        Ok(())
    });

    thread::sleep(Duration::from_millis(20));
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    // Edits take effect on the next iteration, not retroactively.
    source.store(7, Ordering::SeqCst);
    thread::sleep(Duration::from_millis(50));
    auto.stop();

    assert_eq!(seen.load(Ordering::SeqCst), 7);
}
