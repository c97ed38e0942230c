//! Fixed-rate tick pacing for the control loop.

use std::time::{Duration, Instant};

/// Ticks handed out at most per poll after a stall.
const MAX_CATCH_UP: u32 = 5;

/// Tells a host event loop how many control ticks are due.
///
/// Never blocks and never spawns; the host calls [`Ticker::poll`] from its
/// own timer or event loop and runs that many ticks on the control thread.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks due at `now`. The first poll is always due.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let next = *self.next.get_or_insert(now);
        if now < next {
            return 0;
        }

        let behind = (now - next).as_nanos() / self.interval.as_nanos();
        let due = behind as u64 + 1;
        if due > MAX_CATCH_UP as u64 {
            let skipped = due - MAX_CATCH_UP as u64;
            log::debug!("control loop fell {} ticks behind, skipping ahead", skipped);
            self.next = Some(now + self.interval);
            return MAX_CATCH_UP;
        }

        self.next = Some(next + self.interval * due as u32);
        due as u32
    }

    /// How long the host may sleep before the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next.map_or(Duration::ZERO, |next| next.saturating_duration_since(now))
    }
}
