use chrono::{DateTime, Utc};

/// Time source for entry timestamps and journal records.
///
/// Injected rather than read ambiently so ledger exits and audit lines are
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub mod test_clock {
    use super::*;
    use chrono::TimeZone;

    /// Always returns the same instant.
    pub struct FixedClock(pub DateTime<Utc>);

    impl FixedClock {
        pub fn at(secs: i64) -> Self {
            Self(Utc.timestamp_opt(secs, 0).unwrap())
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }
}
