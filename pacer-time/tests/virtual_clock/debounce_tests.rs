// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::ms;
use pacer_test_utils::{CallRecorder, VirtualScheduler};
use pacer_time::Debounce;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

fn setup(
    wait_ms: u64,
) -> (
    VirtualScheduler,
    CallRecorder<u32>,
    Debounce<u32, (), VirtualScheduler>,
) {
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::with_clock(&scheduler);
    let debounced = Debounce::with_scheduler(recorder.callback(), ms(wait_ms), scheduler.clone());
    (scheduler, recorder, debounced)
}

#[test]
fn test_burst_collapses_to_last_call() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);

    // Act
    debounced.call(0);
    scheduler.advance_to(ms(50));
    debounced.call(50);
    scheduler.advance_to(ms(90));
    debounced.call(90);

    // Assert
    scheduler.advance_to(ms(189));
    assert_eq!(recorder.count(), 0);
    assert!(debounced.is_pending());

    scheduler.advance_to(ms(190));
    assert_eq!(recorder.timeline(), vec![(ms(190), 90)]);
    assert!(!debounced.is_pending());

    scheduler.advance(ms(1_000));
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_calls_spaced_beyond_wait_each_fire() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);

    // Act
    debounced.call(1);
    scheduler.advance_to(ms(150));
    debounced.call(2);
    scheduler.advance_to(ms(300));

    // Assert
    assert_eq!(recorder.timeline(), vec![(ms(100), 1), (ms(250), 2)]);
}

#[test]
fn test_idle_wrapper_never_invokes() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);

    // Act
    scheduler.advance(ms(10_000));

    // Assert
    assert_eq!(recorder.count(), 0);
    assert!(!debounced.is_pending());
    assert_eq!(scheduler.pending_timers(), 0);
}

#[test]
fn test_zero_wait_defers_to_next_tick() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(0);

    // Act
    debounced.call(7);

    // Assert
    assert_eq!(recorder.count(), 0);
    assert_eq!(scheduler.tick(), 1);
    assert_eq!(recorder.timeline(), vec![(ms(0), 7)]);
}

#[test]
fn test_only_one_timer_pending_per_wrapper() {
    // Arrange
    let (scheduler, _recorder, debounced) = setup(100);

    // Act
    for n in 0..10 {
        debounced.call(n);
    }

    // Assert
    assert_eq!(scheduler.pending_timers(), 1);
}

#[test]
fn test_cancel_drops_pending_call() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);
    debounced.call(1);

    // Act
    let cancelled = debounced.cancel();

    // Assert
    assert!(cancelled);
    assert!(!debounced.cancel());
    scheduler.advance(ms(500));
    assert_eq!(recorder.count(), 0);

    // The wrapper is reusable
    debounced.call(2);
    scheduler.advance(ms(100));
    assert_eq!(recorder.args(), vec![2]);
}

#[test]
fn test_flush_invokes_now_with_latest_args() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);
    debounced.call(1);
    scheduler.advance_to(ms(40));
    debounced.call(2);

    // Act
    let flushed = debounced.flush();

    // Assert
    assert!(flushed);
    assert_eq!(recorder.timeline(), vec![(ms(40), 2)]);
    scheduler.advance(ms(500));
    assert_eq!(recorder.count(), 1);
    assert!(!debounced.flush());
}

#[test]
fn test_last_output_tracks_latest_invocation() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::new();
    let doubled = Debounce::with_scheduler(
        recorder.callback_returning(|n: &u32| n * 2),
        ms(100),
        scheduler.clone(),
    );

    // Act & Assert
    assert_eq!(doubled.last_output(), None);

    doubled.call(21);
    scheduler.advance(ms(100));
    assert_eq!(doubled.last_output(), Some(42));

    doubled.call(5);
    doubled.flush();
    assert_eq!(doubled.last_output(), Some(10));
}

#[test]
fn test_clones_share_one_pending_call() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);
    let other = debounced.clone();

    // Act
    debounced.call(1);
    scheduler.advance_to(ms(60));
    other.call(2);
    scheduler.advance_to(ms(1_000));

    // Assert
    assert_eq!(recorder.timeline(), vec![(ms(160), 2)]);
}

#[test]
fn test_dropping_last_handle_cancels_pending_call() {
    // Arrange
    let (scheduler, recorder, debounced) = setup(100);
    let other = debounced.clone();
    debounced.call(1);

    // Act
    drop(debounced);
    assert_eq!(scheduler.pending_timers(), 1);
    drop(other);

    // Assert
    assert_eq!(scheduler.pending_timers(), 0);
    scheduler.advance(ms(500));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_instances_wrapping_same_function_are_independent() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::with_clock(&scheduler);
    let first = Debounce::with_scheduler(recorder.callback(), ms(100), scheduler.clone());
    let second = Debounce::with_scheduler(recorder.callback(), ms(100), scheduler.clone());

    // Act
    first.call("first");
    scheduler.advance_to(ms(50));
    second.call("second");
    scheduler.advance_to(ms(500));

    // Assert
    assert_eq!(
        recorder.timeline(),
        vec![(ms(100), "first"), (ms(150), "second")]
    );
}

#[test]
fn test_wrapped_function_may_call_its_own_wrapper() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::with_clock(&scheduler);
    let slot: Arc<OnceLock<Debounce<u32, (), VirtualScheduler>>> = Arc::new(OnceLock::new());

    let record = recorder.callback();
    let slot_clone = slot.clone();
    let debounced = Debounce::with_scheduler(
        move |n: u32| {
            record(n);
            if n < 3 {
                if let Some(own) = slot_clone.get() {
                    own.call(n + 1);
                }
            }
        },
        ms(10),
        scheduler.clone(),
    );
    slot.set(debounced.clone()).unwrap();

    // Act
    debounced.call(0);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.timeline(),
        vec![(ms(10), 0), (ms(20), 1), (ms(30), 2), (ms(40), 3)]
    );
}

#[test]
fn test_panicking_function_leaves_wrapper_usable() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::new();
    let record = recorder.callback();
    let debounced = Debounce::with_scheduler(
        move |n: u32| {
            assert!(n != 0, "zero is not allowed");
            record(n);
        },
        ms(100),
        scheduler.clone(),
    );

    // Act
    debounced.call(0);
    let outcome = catch_unwind(AssertUnwindSafe(|| scheduler.advance(ms(100))));

    // Assert
    assert!(outcome.is_err());
    assert!(!debounced.is_pending());

    debounced.call(1);
    scheduler.advance(ms(100));
    assert_eq!(recorder.args(), vec![1]);
}

#[test]
fn test_zero_wait_self_call_fires_once_per_tick() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::new();
    let slot: Arc<OnceLock<Debounce<u32, (), VirtualScheduler>>> = Arc::new(OnceLock::new());

    let record = recorder.callback();
    let slot_clone = slot.clone();
    let debounced = Debounce::with_scheduler(
        move |n: u32| {
            record(n);
            if n < 50 {
                if let Some(own) = slot_clone.get() {
                    own.call(n + 1);
                }
            }
        },
        ms(0),
        scheduler.clone(),
    );
    slot.set(debounced.clone()).unwrap();

    // Act
    debounced.call(0);
    let fired = scheduler.tick();

    // Assert
    assert_eq!(fired, 1);
    assert_eq!(recorder.args(), vec![0]);
    assert!(debounced.is_pending());

    assert_eq!(scheduler.tick(), 1);
    assert_eq!(recorder.args(), vec![0, 1]);
}
