//! Day-normalised durations.
//!
//! SLO durations are reported as whole days plus a sub-day remainder. No
//! precision is lost; the split only rebalances units for display and
//! comparison.

use chrono::TimeDelta;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// A duration whose largest unit is whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SloDuration(TimeDelta);

impl SloDuration {
    pub fn zero() -> Self {
        SloDuration(TimeDelta::zero())
    }

    /// Returns the full duration.
    pub fn total(&self) -> TimeDelta {
        self.0
    }

    /// Returns the number of whole days (truncated toward zero).
    pub fn days(&self) -> i64 {
        self.0.num_days()
    }

    /// Returns what is left after removing whole days.
    ///
    /// Always strictly less than one day in magnitude, with the same sign as
    /// the total.
    pub fn remainder(&self) -> TimeDelta {
        self.0 - TimeDelta::days(self.days())
    }
}

impl Default for SloDuration {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<TimeDelta> for SloDuration {
    fn from(delta: TimeDelta) -> Self {
        SloDuration(delta)
    }
}

impl fmt::Display for SloDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rest = self.remainder();
        let sign = if self.0 < TimeDelta::zero() { "-" } else { "" };
        let secs = rest.num_seconds().abs();
        write!(
            f,
            "{}{}d {:02}:{:02}:{:02}",
            sign,
            self.days().abs(),
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        )
    }
}

impl Serialize for SloDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rest = self.remainder();
        let seconds = rest.num_seconds();
        let nanos = (rest - TimeDelta::seconds(seconds)).subsec_nanos();
        let mut s = serializer.serialize_struct("SloDuration", 3)?;
        s.serialize_field("days", &self.days())?;
        s.serialize_field("seconds", &seconds)?;
        s.serialize_field("nanos", &nanos)?;
        s.end()
    }
}
