use std::time::{Duration, SystemTime};

use tokio::time::Instant;

/// Self-rearming one-shot refresh timer.
///
/// The next deadline is only set once the current tick has been handled, so
/// a slow refresh pushes the following tick back instead of queueing it.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    deadline: Instant,
}

impl Scheduler {
    /// The first tick is due immediately.
    pub fn new(interval: Duration) -> Self {
        Scheduler {
            interval,
            deadline: Instant::now(),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Wait for the armed deadline and return the wall-clock tick time.
    ///
    /// Cancel-safe: dropping the future leaves the deadline armed.
    pub async fn next_tick(&self) -> SystemTime {
        tokio::time::sleep_until(self.deadline).await;
        SystemTime::now()
    }

    /// Arm the next tick one interval from now. Call after the tick's work
    /// has completed.
    pub fn rearm(&mut self) {
        self.deadline = Instant::now() + self.interval;
    }
}
