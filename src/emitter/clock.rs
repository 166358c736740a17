//! Time source for the extract update timestamp

use chrono::NaiveDateTime;

/// Format of the extract connection's `update-time` attribute
pub const UPDATE_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// `now()` rendered as an `update-time` value
    fn update_time(&self) -> String {
        self.now().format(UPDATE_TIME_FORMAT).to_string()
    }
}

/// Local wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
