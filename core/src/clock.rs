//! Clock abstraction for date-sensitive evaluation.
//!
//! The evaluator asks an injected clock for "today" instead of reading a
//! global, so tests can pin dates without environment tricks. The system
//! clock still honours the `SPROUT_DEBUG_DATE` override used for manual
//! inspection of past or future states.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Environment override for [`SystemClock::today`], `YYYY-MM-DD`.
pub const DEBUG_DATE_VAR: &str = "SPROUT_DEBUG_DATE";

pub trait Clock {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time, with the `SPROUT_DEBUG_DATE` date override.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        if let Ok(raw) = std::env::var(DEBUG_DATE_VAR)
            && let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        {
            return date;
        }
        Local::now().date_naive()
    }
}

/// Clock pinned to one date, for deterministic fixtures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    #[must_use]
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.today.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
