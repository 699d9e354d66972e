//! Wall-clock time for result timestamps.

use chrono::{DateTime, Utc};

/// Source of the timestamp stamped on every [`TestResult`](apiprobe_domain::TestResult).
///
/// Durations are measured with `Instant`; only the wall-clock start of a
/// case goes through here, so tests can pin it.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}
