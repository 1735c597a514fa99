//! Source of "today". Read once per evaluation and passed down explicitly.

use log::warn;

use crate::date::{CalendarDate, Period};
use crate::types::TEST_TIME_ENV;

pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Local-time system clock. `CALGRID_TEST_TIME=YYYY-MM-DD` pins the date
/// for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        if let Ok(test_time) = std::env::var(TEST_TIME_ENV) {
            match test_time.parse::<CalendarDate>() {
                Ok(date) => return date,
                Err(e) => warn!("ignoring {TEST_TIME_ENV}: {e}"),
            }
        }
        CalendarDate::from_naive_unchecked(chrono::Local::now().date_naive())
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

impl Period {
    /// Month containing the clock's current day.
    pub fn today(clock: &impl Clock) -> Self {
        clock.today().period()
    }
}
