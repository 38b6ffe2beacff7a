/// Frame-count timers for the demo driver
/// Each timer counts ticks and decides when to fire

/// Frame counter - fires every N ticks
#[derive(Debug, Clone, Copy)]
pub struct EveryNTicks {
    interval: u64,
    count: u64,
}

impl EveryNTicks {
    /// Create timer that fires every N ticks; zero never fires
    pub fn new(interval: u64) -> Self {
        Self { interval, count: 0 }
    }

    /// Tick once, returns true if should fire
    pub fn tick(&mut self) -> bool {
        if self.interval == 0 {
            return false;
        }
        self.count += 1;
        if self.count >= self.interval {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Reset counter
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// One-shot - fires on the Nth tick, then never again
#[derive(Debug, Clone, Copy)]
pub struct AfterNTicks {
    remaining: Option<u64>,
}

impl AfterNTicks {
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining: Some(ticks),
        }
    }

    /// Timer that never fires
    pub fn disarmed() -> Self {
        Self { remaining: None }
    }

    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(0) | None => false,
            Some(1) => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }
}
