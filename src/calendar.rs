//! Gregorian helpers and the English names used by the exchange format.

use chrono::{Datelike as _, Days, Month, Months, NaiveDate, Weekday};

const DAYS_IN_WEEK: u32 = 7;

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Weekdays in the order the exchange format lists them, Sunday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_yo_opt(year, 366).is_some()
}

/// Number of days in `month` of `year`, `None` outside the years chrono
/// can represent.
pub fn days_in_month(year: i32, month: Month) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

pub fn month_of(date: NaiveDate) -> Month {
    MONTHS[date.month0() as usize]
}

/// How many times the weekday of `date` has occurred in its month, up to and
/// including `date` (1 through 5).
pub fn nth_weekday_of_month(date: NaiveDate) -> u32 {
    date.day0() / DAYS_IN_WEEK + 1
}

/// Whether no later day of the same month falls on the same weekday.
///
/// Not exclusive with [`nth_weekday_of_month`] returning 4: in a month with
/// four of a weekday the fourth is also the last.
pub fn is_last_weekday_of_month(date: NaiveDate) -> bool {
    date.checked_add_days(Days::new(DAYS_IN_WEEK.into()))
        .map_or(true, |later| later.month() != date.month())
}

pub fn month_from_number(month: u32) -> Option<Month> {
    let index = month.checked_sub(1)?;
    MONTHS.get(index as usize).copied()
}

pub fn month_name(month: Month) -> &'static str {
    month.name()
}

pub fn month_from_name(name: &str) -> Option<Month> {
    MONTHS.iter().copied().find(|month| month.name() == name)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .copied()
        .find(|&weekday| weekday_name(weekday) == name)
}
