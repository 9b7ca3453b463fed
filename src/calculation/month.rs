//! Calendar month helpers.
//!
//! Salary records are keyed by month and the attendance flag can be scoped to
//! one; these functions turn any date into the bounds of its month.

use chrono::{Datelike, NaiveDate};

/// Returns the first day of the month containing `date`.
///
/// # Examples
///
/// ```
/// use ems_engine::calculation::month_start;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
/// assert_eq!(month_start(date), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
/// ```
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the first day of the month after the one containing `date`.
///
/// This is the exclusive upper bound of the month.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}

/// Returns the last calendar day of the month containing `date`.
///
/// # Examples
///
/// ```
/// use ems_engine::calculation::month_end;
/// use chrono::NaiveDate;
///
/// let leap = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// assert_eq!(month_end(leap), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn month_end(date: NaiveDate) -> NaiveDate {
    next_month_start(date).pred_opt().unwrap_or(date)
}

/// Returns true if `date` falls in the same calendar month as `month`.
pub fn in_month(date: NaiveDate, month: NaiveDate) -> bool {
    date >= month_start(month) && date < next_month_start(month)
}
