use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn yesterday(&self) -> NaiveDate {
        self.today() - Duration::days(1)
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
