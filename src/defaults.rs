//! Fixed minimal subtrees that stand in for a level with no children.
//!
//! These are only ever borrowed while reading a rule, the authored tree keeps
//! its empty lists. Defaults nest: the default month's own day list is empty
//! and resolves again one level down.

use crate::daily::{Daily, TimeOfDay};
use crate::monthly::{DaySelector, DayOfMonth, MonthDay, Monthly};
use crate::weekly::WeekDay;
use crate::yearly::YearMonth;
use chrono::{Month, Weekday};

/// Every day at 00:00:00.
pub(crate) static TIMES: [TimeOfDay; 1] = [TimeOfDay::MIDNIGHT];

/// Every Sunday.
pub(crate) static WEEK_DAYS: [WeekDay; 1] = [WeekDay::new(Weekday::Sun, Daily::new())];

/// The 1st of the month.
pub(crate) static MONTH_DAYS: [MonthDay; 1] = [MonthDay::new(
    DaySelector::DayOfMonth(DayOfMonth::FIRST),
    Daily::new(),
)];

/// January.
pub(crate) static MONTHS: [YearMonth; 1] = [YearMonth::new(Month::January, Monthly::new())];
