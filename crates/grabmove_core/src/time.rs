//! Frame timing utilities.
//!
//! `Time` is produced once per frame by the application runner and its
//! `delta` becomes the `dt` of that frame's [`FrameInput`](crate::FrameInput).
//! The runner owns the `TimeClock` that produces snapshots.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Longest frame a real-time clock reports; slower frames are clamped.
pub const MAX_DELTA: f32 = 0.1;

/// A snapshot of timing information for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame.
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames ticked so far (starts at 0 for the first frame).
    pub frame_count: u64,
}

// ─── Clock (lives in the runner) ───────────────────────────────────────────

enum Source {
    Wall { start: Instant, last_tick: Instant },
    Fixed { step: f32 },
}

/// Stateful timer that produces [`Time`] snapshots.
///
/// A wall clock measures real frame times; a fixed clock advances by the
/// same step every tick, which makes headless runs reproducible.
pub struct TimeClock {
    source: Source,
    elapsed: f64,
    frame_count: u64,
}

impl TimeClock {
    /// Wall clock, starting the epoch now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            source: Source::Wall { start: now, last_tick: now },
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Deterministic clock advancing `step` seconds per tick.
    pub fn fixed(step: f32) -> Self {
        Self {
            source: Source::Fixed { step: step.max(0.0) },
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Current snapshot without advancing the clock.
    pub fn peek(&self) -> Time {
        match &self.source {
            Source::Wall { start, last_tick } => {
                let now = Instant::now();
                Time {
                    delta: (now - *last_tick).as_secs_f32().min(MAX_DELTA),
                    elapsed: (now - *start).as_secs_f64(),
                    frame_count: self.frame_count,
                }
            }
            Source::Fixed { step } => Time {
                delta: *step,
                elapsed: self.elapsed,
                frame_count: self.frame_count,
            },
        }
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let count = self.frame_count;
        let (delta, elapsed) = match &mut self.source {
            Source::Wall { start, last_tick } => {
                let now = Instant::now();
                let delta = (now - *last_tick).as_secs_f32().min(MAX_DELTA);
                *last_tick = now;
                (delta, (now - *start).as_secs_f64())
            }
            Source::Fixed { step } => (*step, self.elapsed + f64::from(*step)),
        };
        self.elapsed = elapsed;
        self.frame_count += 1;
        Time { delta, elapsed, frame_count: count }
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}
