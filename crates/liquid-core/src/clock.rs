/// Accumulated time of the running cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Clock {
    elapsed: f64,
    running: bool,
}

impl Clock {
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    /// Adds `dt` seconds while running. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.running && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Constant-rate tick source for offline simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedStepClock {
    fps: u32,
}

impl FixedStepClock {
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Seconds between two ticks.
    pub fn delta(&self) -> f64 {
        1.0 / self.fps as f64
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(60)
    }
}
