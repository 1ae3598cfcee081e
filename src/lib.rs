//! Recurrence rules as a small tree (year → month → day → time of day) that
//! can be expanded into concrete timestamps and exchanged as nested JSON.
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use occurs::{Ordinal, RRule, Yearly};
//!
//! let mut yearly = Yearly::new();
//! let april = yearly.month(4)?;
//! april.day(15)?;
//! april.nth_weekday(Ordinal::Last, Weekday::Fri).hour(9)?.set_minute(30)?;
//!
//! let rule = RRule::from(yearly);
//! let from = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
//! let to = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
//! assert_eq!(rule.occurrences(from, to)?.count(), 2);
//!
//! let json = rule.to_json()?;
//! let parsed: RRule = json.parse()?;
//! assert!(parsed.occurrences(from, to)?.eq(rule.occurrences(from, to)?));
//! # Ok::<(), occurs::Error>(())
//! ```

pub mod calendar;
mod daily;
mod date_iterator;
mod defaults;
mod error;
pub mod json;
mod monthly;
mod rrule;
mod weekly;
mod yearly;

pub use daily::{Daily, TimeOfDay};
pub use date_iterator::DateIterator;
pub use error::{Error, ParseError, ParseErrorKind};
pub use monthly::{DayOfMonth, DaySelector, MonthDay, Monthly, Ordinal};
pub use rrule::{Occurrences, RRule};
pub use weekly::{WeekDay, Weekly};
pub use yearly::{YearMonth, Yearly};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The level a rule is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl Level {
    /// Key of the outer object in the exchange format.
    pub fn key(self) -> &'static str {
        match self {
            Level::Yearly => json::YEARLY_KEY,
            Level::Monthly => json::MONTHLY_KEY,
            Level::Weekly => json::WEEKLY_KEY,
            Level::Daily => json::DAILY_KEY,
        }
    }

    pub fn from_key(key: &str) -> Option<Level> {
        match key {
            json::YEARLY_KEY => Some(Level::Yearly),
            json::MONTHLY_KEY => Some(Level::Monthly),
            json::WEEKLY_KEY => Some(Level::Weekly),
            json::DAILY_KEY => Some(Level::Daily),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
