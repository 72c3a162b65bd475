//! Clock abstraction and calendar-day identifiers.
//!
//! All "what day is it" questions go through [`Clock`] so that day rollover
//! can be driven from tests with [`FixedClock`].
//!
//! ```
//! use mindcare_core::clock::{Clock, FixedClock};
//!
//! let clock = FixedClock::ymd_hms(2024, 12, 31, 23, 59, 0);
//! assert_eq!(clock.today().to_string(), "2024-12-31");
//! clock.advance_days(1);
//! assert_eq!(clock.yesterday().to_string(), "2024-12-31");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::plan::Day;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of local wall-clock time.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Calendar day of [`Clock::now`].
    fn today(&self) -> DayId {
        DayId(self.now().date())
    }

    /// The calendar day before [`Clock::today`].
    fn yesterday(&self) -> DayId {
        self.today().pred()
    }

    /// Plan day for today.
    fn weekday(&self) -> Day {
        Day::from(self.now().weekday())
    }

    /// Milliseconds since the Unix epoch for [`Clock::now`] in the local timezone.
    fn millis_since_epoch(&self) -> i64 {
        let now = self.now();
        match now.and_local_timezone(Local).earliest() {
            Some(local) => local.timestamp_millis(),
            // Wall time skipped by a forward DST jump has no instant.
            None => now.and_utc().timestamp_millis(),
        }
    }
}

/// Host clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn millis_since_epoch(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Settable clock for tests. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Panics on an invalid date; intended for literals in tests and docs.
    pub fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let now = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .expect("valid date literal");
        Self::new(now)
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.lock();
        *guard += by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.lock()
    }
}

/// A calendar day, rendered as `YYYY-MM-DD` so that string order is date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayId(NaiveDate);

impl DayId {
    /// The previous calendar day.
    pub fn pred(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayId {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map(Self)
    }
}

impl Serialize for DayId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
