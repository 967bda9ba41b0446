//! Wall-clock adapter

use chrono::{DateTime, Utc};
use council_application::ports::clock::Clock;

/// System time via chrono.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
