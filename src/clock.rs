//! Business date source.
//!
//! Tenure is measured against "today". The calculator takes its notion of
//! today from a [`BusinessClock`] so tests can pin a fixed date.

use chrono::{Local, NaiveDate};

/// Supplies the current business date.
pub trait BusinessClock {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BusinessClock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
///
/// # Example
///
/// ```
/// use salary_engine::clock::{BusinessClock, FixedClock};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2015, 4, 15).unwrap();
/// assert_eq!(FixedClock::new(date).today(), date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    /// Creates a clock that always reports `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl BusinessClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: BusinessClock + ?Sized> BusinessClock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
