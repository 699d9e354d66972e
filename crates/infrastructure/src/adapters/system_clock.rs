//! [`Clock`] backed by the operating system.

use apiprobe_application::ports::Clock;
use chrono::{DateTime, Utc};

/// Reads the system time on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_wall_clock() {
        let before = Utc::now();
        let stamped = SystemClock.now();
        assert!(stamped >= before);
        assert!(stamped <= Utc::now());
    }
}
