//! Tenure calculation functionality.
//!
//! Tenure is counted as "which month of employment" the reference date falls
//! in, not as elapsed duration: an employee is in month 1 on their join date.

use chrono::{Months, NaiveDate};

/// Tenure bonus milestones as (whole years, amount).
pub const TENURE_BONUS_MILESTONES: [(u32, i64); 4] =
    [(3, 3_000), (5, 5_000), (10, 10_000), (20, 20_000)];

/// Counts which month of employment `reference_date` falls in.
///
/// Starting at `join_date`, the date is stepped forward one calendar month at
/// a time, counting each step taken while the stepped date is on or before
/// `reference_date`. Day-of-month clamping carries forward between steps, so
/// a January 31 join date steps to February 28 and then March 28.
///
/// Returns 0 when `join_date` is after `reference_date`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::tenure_months;
/// use chrono::NaiveDate;
///
/// let join = NaiveDate::from_ymd_opt(2013, 4, 1).unwrap();
///
/// // The join date itself is month 1.
/// assert_eq!(tenure_months(join, join), 1);
///
/// // One year to the day is month 13.
/// let anniversary = NaiveDate::from_ymd_opt(2014, 4, 1).unwrap();
/// assert_eq!(tenure_months(join, anniversary), 13);
///
/// // The last day before the anniversary is still month 12.
/// let day_before = NaiveDate::from_ymd_opt(2014, 3, 31).unwrap();
/// assert_eq!(tenure_months(join, day_before), 12);
/// ```
pub fn tenure_months(join_date: NaiveDate, reference_date: NaiveDate) -> u32 {
    let mut current = join_date;
    let mut count: u32 = 0;

    while current <= reference_date {
        count += 1;
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    count
}

/// Whole years of tenure, truncating.
pub fn tenure_years(months: u32) -> u32 {
    months / 12
}

/// The anniversary bonus for a tenure in months.
///
/// Paid only in the month tenure reaches an exact multiple of 12 and only for
/// the 3, 5, 10 and 20 year milestones.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::tenure_bonus;
///
/// assert_eq!(tenure_bonus(36), 3_000);
/// assert_eq!(tenure_bonus(37), 0);
/// assert_eq!(tenure_bonus(48), 0);
/// assert_eq!(tenure_bonus(120), 10_000);
/// ```
pub fn tenure_bonus(months: u32) -> i64 {
    if months == 0 || months % 12 != 0 {
        return 0;
    }
    let years = tenure_years(months);
    TENURE_BONUS_MILESTONES
        .iter()
        .find(|(milestone, _)| *milestone == years)
        .map(|(_, amount)| *amount)
        .unwrap_or(0)
}
