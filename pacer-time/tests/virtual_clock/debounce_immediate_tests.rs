// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::ms;
use pacer_test_utils::{CallRecorder, VirtualScheduler};
use pacer_time::DebounceImmediate;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

type Wrapper = DebounceImmediate<u32, (), VirtualScheduler>;

fn setup(wait_ms: u64, immediate: bool) -> (VirtualScheduler, CallRecorder<u32>, Wrapper) {
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::with_clock(&scheduler);
    let wrapper = DebounceImmediate::with_scheduler(
        recorder.callback(),
        ms(wait_ms),
        immediate,
        scheduler.clone(),
    );
    (scheduler, recorder, wrapper)
}

#[test]
fn test_leading_call_fires_before_call_returns() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, true);

    // Act
    wrapper.call(0);

    // Assert
    assert_eq!(recorder.timeline(), vec![(ms(0), 0)]);
    assert!(wrapper.is_pending());
    assert_eq!(scheduler.pending_timers(), 1);
}

#[test]
fn test_later_calls_in_window_only_move_trailing_edge() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, true);

    // Act
    wrapper.call(0);
    scheduler.advance_to(ms(20));
    wrapper.call(20);

    // Assert
    assert_eq!(recorder.count(), 1);

    scheduler.advance_to(ms(119));
    assert_eq!(recorder.count(), 1);

    scheduler.advance_to(ms(120));
    assert_eq!(recorder.timeline(), vec![(ms(0), 0), (ms(120), 20)]);
}

#[test]
fn test_single_call_fires_on_both_edges() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, true);

    // Act
    wrapper.call(5);
    scheduler.advance(ms(100));

    // Assert
    assert_eq!(recorder.timeline(), vec![(ms(0), 5), (ms(100), 5)]);
}

#[test]
fn test_new_burst_after_trailing_edge_leads_again() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, true);

    // Act
    wrapper.call(1);
    scheduler.advance_to(ms(150));
    wrapper.call(2);

    // Assert
    assert_eq!(
        recorder.timeline(),
        vec![(ms(0), 1), (ms(100), 1), (ms(150), 2)]
    );
}

#[test]
fn test_without_immediate_behaves_like_debounce() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, false);
    assert!(!wrapper.is_immediate());

    // Act
    wrapper.call(0);
    scheduler.advance_to(ms(50));
    wrapper.call(50);
    scheduler.advance_to(ms(90));
    wrapper.call(90);

    // Assert
    assert_eq!(recorder.count(), 0);
    scheduler.advance_to(ms(1_000));
    assert_eq!(recorder.timeline(), vec![(ms(190), 90)]);
}

#[test]
fn test_cancel_after_leading_edge_suppresses_trailing_edge() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, true);
    wrapper.call(1);

    // Act
    let cancelled = wrapper.cancel();

    // Assert
    assert!(cancelled);
    scheduler.advance(ms(500));
    assert_eq!(recorder.args(), vec![1]);

    // Idle again, so the next call leads
    wrapper.call(2);
    assert_eq!(recorder.args(), vec![1, 2]);
}

#[test]
fn test_flush_runs_trailing_edge_early() {
    // Arrange
    let (scheduler, recorder, wrapper) = setup(100, true);
    wrapper.call(1);
    scheduler.advance_to(ms(30));
    wrapper.call(2);

    // Act
    let flushed = wrapper.flush();

    // Assert
    assert!(flushed);
    assert_eq!(recorder.timeline(), vec![(ms(0), 1), (ms(30), 2)]);
    scheduler.advance(ms(500));
    assert_eq!(recorder.count(), 2);
}

#[test]
fn test_last_output_includes_leading_edge() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::new();
    let wrapper = DebounceImmediate::with_scheduler(
        recorder.callback_returning(|n: &u32| n + 100),
        ms(100),
        true,
        scheduler.clone(),
    );

    // Act
    wrapper.call(1);

    // Assert
    assert_eq!(wrapper.last_output(), Some(101));
    wrapper.call(2);
    scheduler.advance(ms(100));
    assert_eq!(wrapper.last_output(), Some(102));
}

#[test]
fn test_reentrant_call_during_leading_edge_joins_burst() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::with_clock(&scheduler);
    let slot: Arc<OnceLock<Wrapper>> = Arc::new(OnceLock::new());

    let record = recorder.callback();
    let slot_clone = slot.clone();
    let wrapper = DebounceImmediate::with_scheduler(
        move |n: u32| {
            record(n);
            if n == 0 {
                if let Some(own) = slot_clone.get() {
                    own.call(1);
                }
            }
        },
        ms(100),
        true,
        scheduler.clone(),
    );
    slot.set(wrapper.clone()).unwrap();

    // Act
    wrapper.call(0);

    // Assert
    assert_eq!(recorder.args(), vec![0]);
    assert_eq!(scheduler.pending_timers(), 1);

    scheduler.advance(ms(100));
    assert_eq!(recorder.timeline(), vec![(ms(0), 0), (ms(100), 1)]);
}

#[test]
fn test_panic_on_leading_edge_resets_wrapper() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::new();
    let record = recorder.callback();
    let wrapper = DebounceImmediate::with_scheduler(
        move |n: u32| {
            assert!(n != 0, "zero is not allowed");
            record(n);
        },
        ms(100),
        true,
        scheduler.clone(),
    );

    // Act
    let outcome = catch_unwind(AssertUnwindSafe(|| wrapper.call(0)));

    // Assert
    assert!(outcome.is_err());
    assert!(!wrapper.is_pending());

    wrapper.call(1);
    assert_eq!(recorder.args(), vec![1]);
}

#[test]
fn test_accessors_report_configuration() {
    // Arrange
    let (_scheduler, _recorder, wrapper) = setup(250, true);

    // Assert
    assert_eq!(wrapper.wait(), ms(250));
    assert!(wrapper.is_immediate());
    assert!(format!("{wrapper:?}").contains("immediate: true"));
}

#[test]
fn test_panic_after_reentrant_call_keeps_its_trailing_edge() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = CallRecorder::with_clock(&scheduler);
    let slot: Arc<OnceLock<Wrapper>> = Arc::new(OnceLock::new());

    let record = recorder.callback();
    let slot_clone = slot.clone();
    let wrapper = DebounceImmediate::with_scheduler(
        move |n: u32| {
            record(n);
            if n == 0 {
                if let Some(own) = slot_clone.get() {
                    own.call(1);
                }
                panic!("leading edge failed after rescheduling");
            }
        },
        ms(100),
        true,
        scheduler.clone(),
    );
    slot.set(wrapper.clone()).unwrap();

    // Act
    let outcome = catch_unwind(AssertUnwindSafe(|| wrapper.call(0)));

    // Assert
    assert!(outcome.is_err());
    assert!(wrapper.is_pending());

    scheduler.advance(ms(100));
    assert_eq!(recorder.timeline(), vec![(ms(0), 0), (ms(100), 1)]);
    assert!(!wrapper.is_pending());
}
