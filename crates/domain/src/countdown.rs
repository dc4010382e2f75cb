pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;

const TICK_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(u32),
    Fire,
    Finished,
}

/// Seconds-to-capture timer driven by the caller's clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    seconds: u32,
    started_ms: u64,
    fired: bool,
}

impl Countdown {
    pub fn start(seconds: u32, now_ms: u64) -> Self {
        Self {
            seconds,
            started_ms: now_ms,
            fired: false,
        }
    }

    pub fn remaining(&self, now_ms: u64) -> u32 {
        let elapsed = (now_ms.saturating_sub(self.started_ms) / TICK_MS) as u32;
        self.seconds.saturating_sub(elapsed)
    }

    /// `Fire` is returned exactly once, on the first tick at or past zero.
    pub fn tick(&mut self, now_ms: u64) -> CountdownTick {
        if self.fired {
            return CountdownTick::Finished;
        }
        match self.remaining(now_ms) {
            0 => {
                self.fired = true;
                CountdownTick::Fire
            }
            remaining => CountdownTick::Remaining(remaining),
        }
    }
}
