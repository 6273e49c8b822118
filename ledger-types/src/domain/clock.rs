//! Time source used to stamp `createdAt` / `updatedAt`.
//!
//! Services take an `Arc<dyn Clock>`; production wires `SystemClock`,
//! tests pin time with `FixedClock`.

use chrono::{DateTime, Local, TimeZone, Utc};

pub use mockable::{Clock, DefaultClock as SystemClock};

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Creates a clock frozen at the given epoch milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn at_millis(millis: i64) -> Self {
        let at = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH);
        Self(at)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
