//! Fixed-timestep clock driving the engine from real time.
//!
//! Each `frame` call converts elapsed real time into whole due ticks and runs
//! at most `max_catch_up_ticks` of them. Due ticks beyond the cap are dropped,
//! not carried over. The snapshot is built once per frame regardless of how
//! many ticks ran.

use std::time::Duration;

use tracing::trace;

use vanguard_core::state::WorldSnapshot;

use crate::engine::{SimConfig, SimulationEngine};

/// Result of one clock invocation.
#[derive(Debug, Clone)]
pub struct Frame {
    pub ticks_run: u32,
    /// Due ticks discarded by the catch-up cap (or skipped while paused).
    pub ticks_dropped: u64,
    pub snapshot: WorldSnapshot,
}

pub struct SimClock {
    tick_duration: Duration,
    max_catch_up_ticks: u32,
    /// Real-time stamp of the last consumed tick boundary.
    last_tick: Option<Duration>,
    paused: bool,
}

impl SimClock {
    pub fn new(config: &SimConfig) -> Self {
        let rate = config.tick_rate.max(1);
        Self {
            tick_duration: Duration::from_nanos((1_000_000_000 / rate as u64).max(1)),
            max_catch_up_ticks: config.max_catch_up_ticks,
            last_tick: None,
            paused: false,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume ticking. No drift correction beyond the catch-up cap.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Consume elapsed real time up to `now` and return (ticks to run, ticks dropped).
    ///
    /// `now` is any monotonic timestamp, e.g. `Instant::elapsed` from app start.
    pub fn due_ticks(&mut self, now: Duration) -> (u32, u64) {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return (0, 0);
        };
        let elapsed = now.saturating_sub(last);
        let due = (elapsed.as_nanos() / self.tick_duration.as_nanos()) as u64;
        // Keep the fractional remainder so ticks stay on the fixed grid
        self.last_tick = Some(last + self.tick_duration * due.min(u32::MAX as u64) as u32);

        if self.paused {
            return (0, due);
        }
        let run = due.min(self.max_catch_up_ticks as u64) as u32;
        (run, due - run as u64)
    }

    /// Run due ticks on `engine` and build one snapshot for presentation.
    pub fn frame(&mut self, engine: &mut SimulationEngine, now: Duration) -> Frame {
        let (ticks_run, ticks_dropped) = self.due_ticks(now);
        for _ in 0..ticks_run {
            engine.tick();
        }
        if ticks_dropped > 0 && !self.paused {
            trace!(ticks_dropped, "clock fell behind; dropping catch-up ticks");
        }
        let mut snapshot = engine.snapshot();
        snapshot.paused = self.paused;
        Frame {
            ticks_run,
            ticks_dropped,
            snapshot,
        }
    }
}
