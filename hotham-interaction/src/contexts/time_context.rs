/// The simulation clock, advanced once per tick by [`crate::Engine::update`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeContext {
    now: f32,
    delta: f32,
}

impl TimeContext {
    /// Seconds since the engine started
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Length of the last tick, in seconds
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Move the clock forward by `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta.max(0.);
        self.now += self.delta;
    }
}
