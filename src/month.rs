//! Calendar month boundaries.
//!
//! The expense list filter and the monthly summary queries both restrict rows
//! to one calendar month, so they share this module to guarantee they match
//! the same set of rows.

use time::{Date, Month};

use crate::Error;

/// Get the first and last day of `month` in `year`, inclusive.
///
/// # Errors
/// This function will return an [Error::InvalidMonth] if `month` is not in the
/// range 1-12 or if `year` is outside the range of years a [Date] can hold.
pub fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), Error> {
    let calendar_month = Month::try_from(month).map_err(|_| Error::InvalidMonth { month, year })?;

    let start = Date::from_calendar_date(year, calendar_month, 1)
        .map_err(|_| Error::InvalidMonth { month, year })?;

    let next_month_year = match calendar_month {
        Month::December => year + 1,
        _ => year,
    };
    let end = Date::from_calendar_date(next_month_year, calendar_month.next(), 1)
        .map_err(|_| Error::InvalidMonth { month, year })?
        .previous_day()
        .ok_or(Error::InvalidMonth { month, year })?;

    Ok((start, end))
}
