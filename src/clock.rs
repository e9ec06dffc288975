//! Clock Abstraction Module
//!
//! Decouples the engine's timing decisions from wall-clock reality so that
//! expiration and sweep scheduling can be driven deterministically in tests.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// == Clock Trait ==
/// Source of time for the cache engine and its sweep loop.
///
/// `now` may be called from the read/write path and from the sweep loop;
/// `should_sweep` is only ever called by the single sweep loop.
pub trait Clock: Send + Sync {
    /// Returns the current instant. Monotonic: never decreases across calls.
    fn now(&self) -> Instant;

    /// Returns true when a sweep of the table is due.
    ///
    /// Side effects are limited to internal counters.
    fn should_sweep(&self) -> bool;
}

// == System Clock ==
/// Real-time clock.
///
/// `should_sweep` reports true once every `threshold` whole sweep intervals,
/// so the sweep loop only takes the write lock every
/// `interval * threshold` of wall time.
#[derive(Debug)]
pub struct SystemClock {
    interval: Duration,
    threshold: u32,
    state: Mutex<SweepState>,
}

#[derive(Debug)]
struct SweepState {
    last_tick: Instant,
    elapsed_intervals: u32,
}

impl SystemClock {
    /// Creates a system clock that signals a sweep after `threshold` whole
    /// `interval`s have elapsed.
    pub fn new(interval: Duration, threshold: u32) -> Self {
        Self {
            interval,
            threshold: threshold.max(1),
            state: Mutex::new(SweepState {
                last_tick: Instant::now(),
                elapsed_intervals: 0,
            }),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn should_sweep(&self) -> bool {
        let mut state = self.state.lock().expect("clock state poisoned");
        let now = Instant::now();
        if now.duration_since(state.last_tick) < self.interval {
            return false;
        }
        state.last_tick = now;
        state.elapsed_intervals += 1;
        if state.elapsed_intervals >= self.threshold {
            state.elapsed_intervals = 0;
            true
        } else {
            false
        }
    }
}

// == Manual Clock ==
/// Fully controllable clock for deterministic tests.
///
/// Clones share the same underlying state, so a test can advance time while
/// the engine holds its own handle to the clock. Time only moves forward.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    state: Arc<Mutex<ManualState>>,
}

#[derive(Debug)]
struct ManualState {
    elapsed: Duration,
    sweep_armed: bool,
}

impl ManualClock {
    /// Creates a manual clock anchored at the current real instant.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            state: Arc::new(Mutex::new(ManualState {
                elapsed: Duration::ZERO,
                sweep_armed: false,
            })),
        }
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut state = self.state.lock().expect("clock state poisoned");
        state.elapsed += duration;
    }

    /// Makes the next `should_sweep` call return true, exactly once.
    pub fn arm_sweep(&self) {
        let mut state = self.state.lock().expect("clock state poisoned");
        state.sweep_armed = true;
    }

    /// Returns how far the clock has been advanced.
    pub fn elapsed(&self) -> Duration {
        self.state.lock().expect("clock state poisoned").elapsed
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.state.lock().expect("clock state poisoned").elapsed
    }

    fn should_sweep(&self) -> bool {
        let mut state = self.state.lock().expect("clock state poisoned");
        std::mem::take(&mut state.sweep_armed)
    }
}
