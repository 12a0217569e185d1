//! Tick-counter throttling of expensive derived-data refreshes.
//!
//! Normal recomputation and collider reassignment are far more expensive than
//! the per-tick position/color rewrite, so they run on modular tick intervals
//! instead of every frame.

/// Monotonic tick counter with modular gating.
#[derive(Debug, Default)]
pub struct UpdateThrottle {
    counter: u64,
}

impl UpdateThrottle {
    /// Creates a throttle at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter by one tick. Call once per geometry rewrite,
    /// before querying the `*_due` methods.
    pub fn advance(&mut self) {
        self.counter += 1;
    }

    /// Whether normals should be recomputed this tick.
    pub fn normals_due(&self, enabled: bool, interval: u32) -> bool {
        enabled && self.counter % u64::from(interval.max(1)) == 0
    }

    /// Whether the collision representation should be refreshed this tick.
    pub fn collision_due(&self, enabled: bool, interval: u32) -> bool {
        enabled && self.counter % u64::from(interval.max(1)) == 0
    }

    /// Ticks elapsed since construction.
    pub fn ticks(&self) -> u64 {
        self.counter
    }
}
