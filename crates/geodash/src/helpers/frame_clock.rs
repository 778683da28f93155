#[cfg(not(wasm))]
pub use std::time::{Duration, Instant};
#[cfg(wasm)]
pub use web_time::{Duration, Instant};

/// Info returned each frame.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Delta in seconds after clamping.
    pub dt_seconds: f64,
    /// Total simulated time since the clock was created/reset.
    pub elapsed_seconds: f64,
    /// Incrementing frame index (starts at 1 on first tick).
    pub frame: u64,
}

/// Frame timing for the globe.
///
/// `tick()` reads the wall clock; `advance()` takes an explicit delta so
/// hosts that already know their frame time (or tests) stay deterministic.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    frame: u64,
    elapsed: f64,
    /// Clamp excessively large dt (e.g., after a tab was hidden).
    clamp_dt: Duration,
}

impl FrameClock {
    pub fn new(clamp_dt: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame: 0,
            elapsed: 0.0,
            clamp_dt,
        }
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.frame = 0;
        self.elapsed = 0.0;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame using the wall clock.
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let raw_dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.advance(raw_dt)
    }

    /// Advance one frame by `dt`.
    pub fn advance(&mut self, dt: Duration) -> Tick {
        let dt = dt.min(self.clamp_dt);
        let dt_seconds = dt.as_secs_f64();

        self.frame = self.frame.saturating_add(1);
        self.elapsed += dt_seconds;

        Tick {
            dt_seconds,
            elapsed_seconds: self.elapsed,
            frame: self.frame,
        }
    }
}

impl Default for FrameClock {
    /// 100ms clamp.
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}
