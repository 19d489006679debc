//! The playback state machine.
//!
//! A [`Playback`] owns the cursor over one trace: the current step index,
//! whether auto-advance is running, and the speed. All transitions are
//! synchronous and total; the async ticker merely delivers `tick()` calls.
//!
//! Boundary rules, which the tests pin down exactly:
//! - `play()` at the last index rewinds to 0 first (replay-from-end is a
//!   deliberate UX contract, not an accident);
//! - manual stepping (`next`/`previous`) always pauses auto-play, even when
//!   the index cannot move;
//! - the tick that reaches the last index stops playback there; the index
//!   never wraps and never overshoots.

use std::time::Duration;

use serde::Serialize;

use algoviz_core::prelude::*;
use algoviz_core::{Step, Trace};

/// Read-only snapshot of playback, published to the control registry for
/// the toolbar UI (play/pause button state, step counter).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackState {
    pub step_index: usize,
    pub playing: bool,
    pub speed: f64,
    /// Total steps in the trace, for the "3 / 12" style counter.
    pub trace_len: usize,
}

/// Cursor over one trace: step index, playing flag, speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    step_index: usize,
    playing: bool,
    speed: f64,
    trace_len: usize,
}

impl Playback {
    /// Create playback over a trace of `trace_len` steps, paused at step 0.
    ///
    /// `trace_len` is at least 1 by the trace invariant.
    pub fn new(trace_len: usize, speed: f64) -> Self {
        debug_assert!(trace_len >= 1, "traces are non-empty by construction");
        Self {
            step_index: 0,
            playing: false,
            speed: if speed > 0.0 { speed } else { 1.0 },
            trace_len: trace_len.max(1),
        }
    }

    /// Install a replacement trace: back to step 0, paused, speed kept.
    pub fn attach(&mut self, trace_len: usize) {
        debug_assert!(trace_len >= 1, "traces are non-empty by construction");
        self.trace_len = trace_len.max(1);
        self.step_index = 0;
        self.playing = false;
    }

    /// Start auto-advance. Pressing play at the end replays from the start.
    pub fn play(&mut self) {
        if self.step_index == self.last_index() {
            self.step_index = 0;
        }
        self.playing = true;
    }

    /// Stop auto-advance, keeping the index.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Step forward manually. Saturates at the last index; always pauses.
    pub fn next(&mut self) {
        if self.step_index < self.last_index() {
            self.step_index += 1;
        }
        self.playing = false;
    }

    /// Step backward manually. Saturates at 0; always pauses.
    pub fn previous(&mut self) {
        if self.step_index > 0 {
            self.step_index -= 1;
        }
        self.playing = false;
    }

    /// Back to step 0, paused. Speed is unchanged.
    pub fn reset(&mut self) {
        self.step_index = 0;
        self.playing = false;
    }

    /// Change the speed. Non-positive or non-finite values are ignored.
    /// The index is untouched; the new cadence applies from the next tick.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            warn!("ignoring invalid playback speed {speed}");
        }
    }

    /// One auto-advance tick. No-op unless playing; the tick that reaches
    /// the last index stops playback there.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        if self.step_index < self.last_index() {
            self.step_index += 1;
        }
        if self.step_index == self.last_index() {
            self.playing = false;
        }
    }

    /// The time between ticks at the current speed: `1000 / speed` ms,
    /// floored at `min_tick_ms` so extreme speeds cannot busy-loop.
    pub fn tick_interval(&self, min_tick_ms: u64) -> Duration {
        let ms = (1000.0 / self.speed).round() as u64;
        Duration::from_millis(ms.max(min_tick_ms))
    }

    /// The step under the cursor, with a defensive fallback to step 0 if
    /// the index is ever out of range. The fallback avoids a hard crash on
    /// a broken invariant; it does not make the breakage correct.
    pub fn current_step<'t>(&self, trace: &'t Trace) -> &'t Step {
        match trace.get(self.step_index) {
            Some(step) => step,
            None => {
                error!(
                    "step index {} out of range for trace of {} steps; falling back to step 0",
                    self.step_index,
                    trace.len()
                );
                &trace[0]
            }
        }
    }

    pub fn current_index(&self) -> usize {
        self.step_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn trace_len(&self) -> usize {
        self.trace_len
    }

    /// Index of the terminal step.
    pub fn last_index(&self) -> usize {
        self.trace_len - 1
    }

    /// Whether the cursor is on the terminal step.
    pub fn is_at_end(&self) -> bool {
        self.step_index == self.last_index()
    }

    /// Snapshot for the control registry.
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            step_index: self.step_index,
            playing: self.playing,
            speed: self.speed,
            trace_len: self.trace_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_paused_at_zero() {
        let pb = Playback::new(5, 1.0);
        assert_eq!(pb.current_index(), 0);
        assert!(!pb.is_playing());
        assert_eq!(pb.speed(), 1.0);
    }

    #[test]
    fn test_play_at_end_rewinds_first() {
        let mut pb = Playback::new(3, 1.0);
        pb.next();
        pb.next();
        assert!(pb.is_at_end());

        pb.play();
        assert_eq!(pb.current_index(), 0);
        assert!(pb.is_playing());
    }

    #[test]
    fn test_play_mid_trace_keeps_index() {
        let mut pb = Playback::new(3, 1.0);
        pb.next();
        pb.play();
        assert_eq!(pb.current_index(), 1);
        assert!(pb.is_playing());
    }

    #[test]
    fn test_tick_advances_by_one_and_stops_at_end() {
        let mut pb = Playback::new(3, 1.0);
        pb.play();
        pb.tick();
        assert_eq!(pb.current_index(), 1);
        assert!(pb.is_playing());

        // The tick that reaches the last index stops playback there.
        pb.tick();
        assert_eq!(pb.current_index(), 2);
        assert!(!pb.is_playing());

        // Further ticks never overshoot or wrap.
        pb.tick();
        assert_eq!(pb.current_index(), 2);
        assert!(!pb.is_playing());
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut pb = Playback::new(3, 1.0);
        pb.tick();
        assert_eq!(pb.current_index(), 0);
    }

    #[test]
    fn test_single_step_trace_stops_immediately() {
        let mut pb = Playback::new(1, 1.0);
        pb.play();
        assert!(pb.is_playing());
        pb.tick();
        assert_eq!(pb.current_index(), 0);
        assert!(!pb.is_playing());
    }

    #[test]
    fn test_manual_stepping_pauses_even_at_boundaries() {
        let mut pb = Playback::new(2, 1.0);
        pb.play();
        pb.previous();
        assert_eq!(pb.current_index(), 0);
        assert!(!pb.is_playing());

        pb.next();
        assert_eq!(pb.current_index(), 1);
        pb.play();
        // play at end rewound to 0; step to the end again.
        pb.next();
        assert!(pb.is_at_end());
        pb.play();
        pb.next();
        // next at the last index is a no-op on the index but still pauses.
        assert_eq!(pb.current_index(), 1);
        assert!(!pb.is_playing());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut pb = Playback::new(4, 2.0);
        pb.next();
        pb.play();
        pb.reset();
        let once = pb.clone();
        pb.reset();
        assert_eq!(pb, once);
        assert_eq!(pb.current_index(), 0);
        assert!(!pb.is_playing());
        assert_eq!(pb.speed(), 2.0);
    }

    #[test]
    fn test_attach_resets_index_and_keeps_speed() {
        let mut pb = Playback::new(4, 2.0);
        pb.next();
        pb.play();
        pb.attach(7);
        assert_eq!(pb.current_index(), 0);
        assert!(!pb.is_playing());
        assert_eq!(pb.speed(), 2.0);
        assert_eq!(pb.trace_len(), 7);
    }

    #[test]
    fn test_set_speed_ignores_invalid_values() {
        let mut pb = Playback::new(3, 1.0);
        pb.set_speed(0.0);
        assert_eq!(pb.speed(), 1.0);
        pb.set_speed(-2.0);
        assert_eq!(pb.speed(), 1.0);
        pb.set_speed(f64::NAN);
        assert_eq!(pb.speed(), 1.0);
        pb.set_speed(2.0);
        assert_eq!(pb.speed(), 2.0);
    }

    #[test]
    fn test_set_speed_does_not_move_the_index() {
        let mut pb = Playback::new(5, 1.0);
        pb.play();
        pb.tick();
        pb.set_speed(2.0);
        assert_eq!(pb.current_index(), 1);
        assert!(pb.is_playing());
    }

    #[test]
    fn test_tick_interval_follows_speed() {
        let mut pb = Playback::new(3, 1.0);
        assert_eq!(pb.tick_interval(10), Duration::from_millis(1000));
        pb.set_speed(2.0);
        assert_eq!(pb.tick_interval(10), Duration::from_millis(500));
        pb.set_speed(4.0);
        assert_eq!(pb.tick_interval(10), Duration::from_millis(250));
        // Extreme speeds are floored.
        pb.set_speed(500.0);
        assert_eq!(pb.tick_interval(10), Duration::from_millis(10));
    }

    #[test]
    fn test_current_step_falls_back_to_first() {
        use algoviz_core::{TraceRecorder, VarSnapshot};
        use serde_json::Value;

        let mut rec = TraceRecorder::new();
        rec.step(1, "start", VarSnapshot::new());
        let trace = rec.finish(2, "done", VarSnapshot::new(), Value::Null);

        // A playback sized for a longer trace simulates a broken invariant.
        let mut pb = Playback::new(5, 1.0);
        pb.next();
        pb.next();
        pb.next();
        assert_eq!(pb.current_index(), 3);
        let step = pb.current_step(&trace);
        assert_eq!(step.line, 1);

        // In-range indices resolve normally.
        let pb = Playback::new(trace.len(), 1.0);
        assert_eq!(pb.current_step(&trace).line, 1);
    }
}
