use crate::{calendar, defaults, Daily, Error, Result};
use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Weekday};
use std::fmt;

/// Position of a weekday within its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    pub const ALL: [Ordinal; 5] = [
        Ordinal::First,
        Ordinal::Second,
        Ordinal::Third,
        Ordinal::Fourth,
        Ordinal::Last,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ordinal::First => "First",
            Ordinal::Second => "Second",
            Ordinal::Third => "Third",
            Ordinal::Fourth => "Fourth",
            Ordinal::Last => "Last",
        }
    }

    pub fn from_name(name: &str) -> Option<Ordinal> {
        Ordinal::ALL
            .iter()
            .copied()
            .find(|ordinal| ordinal.name() == name)
    }

    /// Whether `date` is at this position among the days sharing its weekday.
    /// `Fourth` and `Last` both match the fourth of a weekday that occurs
    /// only four times that month.
    pub fn matches(self, date: NaiveDate) -> bool {
        match self {
            Ordinal::First => calendar::nth_weekday_of_month(date) == 1,
            Ordinal::Second => calendar::nth_weekday_of_month(date) == 2,
            Ordinal::Third => calendar::nth_weekday_of_month(date) == 3,
            Ordinal::Fourth => calendar::nth_weekday_of_month(date) == 4,
            Ordinal::Last => calendar::is_last_weekday_of_month(date),
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A day of the month, 1 through 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub const FIRST: DayOfMonth = DayOfMonth(1);

    pub fn new(day: u32) -> Result<Self> {
        match day {
            1..=31 => Ok(DayOfMonth(day as u8)),
            _ => Err(Error::out_of_range("day", day, 1, 31)),
        }
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }
}

impl fmt::Display for DayOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which days of a month a [`MonthDay`] picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySelector {
    DayOfMonth(DayOfMonth),
    NthWeekday(Ordinal, Weekday),
}

impl DaySelector {
    pub fn day_of_month(day: u32) -> Result<Self> {
        DayOfMonth::new(day).map(DaySelector::DayOfMonth)
    }

    /// A day that doesn't exist in the month, like the 31st of April, never
    /// matches.
    pub fn matches(self, date: NaiveDate) -> bool {
        match self {
            DaySelector::DayOfMonth(day) => date.day() == day.get(),
            DaySelector::NthWeekday(ordinal, weekday) => {
                date.weekday() == weekday && ordinal.matches(date)
            }
        }
    }
}

/// A day selector and the times it fires at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDay {
    selector: DaySelector,
    daily: Daily,
}

impl MonthDay {
    pub const fn new(selector: DaySelector, daily: Daily) -> Self {
        MonthDay { selector, daily }
    }

    pub fn selector(&self) -> DaySelector {
        self.selector
    }

    pub fn daily(&self) -> &Daily {
        &self.daily
    }

    fn is_day_of_month(&self) -> bool {
        matches!(self.selector, DaySelector::DayOfMonth(_))
    }
}

/// Every month, on the selected days.
///
/// Days picked by day of month and days picked by nth weekday are kept as two
/// ordered groups; day-of-month entries always come first. With no days
/// selected the month fires on the 1st.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Monthly {
    the: Vec<MonthDay>,
}

impl Monthly {
    pub const fn new() -> Self {
        Monthly { the: Vec::new() }
    }

    pub fn day(&mut self, day: u32) -> Result<&mut Daily> {
        let selector = DaySelector::day_of_month(day)?;
        Ok(self.select(selector))
    }

    pub fn nth_weekday(&mut self, ordinal: Ordinal, weekday: Weekday) -> &mut Daily {
        self.select(DaySelector::NthWeekday(ordinal, weekday))
    }

    pub fn select(&mut self, selector: DaySelector) -> &mut Daily {
        self.the.push(MonthDay::new(selector, Daily::new()));
        let last = self.the.len() - 1;
        &mut self.the[last].daily
    }

    /// Days in the order they were attached, possibly empty.
    pub fn days(&self) -> &[MonthDay] {
        &self.the
    }

    pub fn by_day_of_month(&self) -> impl Iterator<Item = (DayOfMonth, &Daily)> + '_ {
        self.the.iter().filter_map(|day| match day.selector {
            DaySelector::DayOfMonth(day_of_month) => Some((day_of_month, &day.daily)),
            DaySelector::NthWeekday(..) => None,
        })
    }

    pub fn by_nth_weekday(&self) -> impl Iterator<Item = (Ordinal, Weekday, &Daily)> + '_ {
        self.the.iter().filter_map(|day| match day.selector {
            DaySelector::NthWeekday(ordinal, weekday) => Some((ordinal, weekday, &day.daily)),
            DaySelector::DayOfMonth(_) => None,
        })
    }

    /// Day-of-month entries followed by nth-weekday entries, or the 1st of
    /// the month when none are selected.
    pub fn resolved_days(&self) -> impl Iterator<Item = &MonthDay> + Clone + '_ {
        let the: &[MonthDay] = if self.the.is_empty() {
            &defaults::MONTH_DAYS
        } else {
            &self.the
        };

        the.iter()
            .filter(|day| day.is_day_of_month())
            .chain(the.iter().filter(|day| !day.is_day_of_month()))
    }

    pub(crate) fn expand(&self, date: NaiveDate, out: &mut Vec<NaiveDateTime>) {
        for day in self.resolved_days() {
            if day.selector.matches(date) {
                day.daily.expand(date, out);
            }
        }
    }
}
