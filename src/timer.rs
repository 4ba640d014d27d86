use std::time::Duration;

/// Decides on which frames the game steps.
///
/// Times are measured from an arbitrary start, usually the moment the frame
/// loop began. A frame that finds several intervals elapsed still yields a
/// single tick; missed steps are not replayed.
pub struct TickTimer {
    last_tick: Duration,
    interval: Duration,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        TickTimer { last_tick: Duration::ZERO, interval }
    }

    pub fn should_tick(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_tick) >= self.interval {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}
