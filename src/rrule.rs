use crate::{json, Daily, DateIterator, Error, Level, Monthly, Result, Weekly, Yearly};
use chrono::{NaiveDate, NaiveDateTime};
use std::iter::FusedIterator;
use std::str::FromStr;

/// A recurrence rule, rooted at one of the four levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRule {
    Yearly(Yearly),
    Monthly(Monthly),
    Weekly(Weekly),
    Daily(Daily),
}

impl RRule {
    /// Every year on January 1st at midnight until months are attached.
    pub fn every_year() -> Self {
        RRule::Yearly(Yearly::new())
    }

    /// Every month on the 1st at midnight until days are attached.
    pub fn every_month() -> Self {
        RRule::Monthly(Monthly::new())
    }

    /// Every week on Sunday at midnight until days are attached.
    pub fn every_week() -> Self {
        RRule::Weekly(Weekly::new())
    }

    /// Every day at midnight until times are attached.
    pub fn every_day() -> Self {
        RRule::Daily(Daily::new())
    }

    pub fn level(&self) -> Level {
        match self {
            RRule::Yearly(_) => Level::Yearly,
            RRule::Monthly(_) => Level::Monthly,
            RRule::Weekly(_) => Level::Weekly,
            RRule::Daily(_) => Level::Daily,
        }
    }

    /// Lazily lists every occurrence on the dates from `from` to `to`,
    /// inclusive.
    ///
    /// Dates come in ascending order. Occurrences on the same date come in the
    /// order their entries were attached, they are not sorted by time of day.
    pub fn occurrences(&self, from: NaiveDate, to: NaiveDate) -> Result<Occurrences<'_>> {
        if from > to {
            return Err(Error::InvalidWindow { from, to });
        }

        tracing::debug!(level = %self.level(), %from, %to, "enumerating occurrences");

        Ok(Occurrences {
            rule: self,
            dates: DateIterator::new(from, to),
            pending: Vec::new().into_iter(),
        })
    }

    /// Compact exchange text, see [`json::write`] for other layouts.
    pub fn to_json(&self) -> Result<String> {
        json::write(self, &json::WriteOptions::default())
    }

    fn expand(&self, date: NaiveDate, out: &mut Vec<NaiveDateTime>) {
        match self {
            RRule::Yearly(yearly) => yearly.expand(date, out),
            RRule::Monthly(monthly) => monthly.expand(date, out),
            RRule::Weekly(weekly) => weekly.expand(date, out),
            RRule::Daily(daily) => daily.expand(date, out),
        }
    }
}

impl From<Yearly> for RRule {
    fn from(yearly: Yearly) -> Self {
        RRule::Yearly(yearly)
    }
}

impl From<Monthly> for RRule {
    fn from(monthly: Monthly) -> Self {
        RRule::Monthly(monthly)
    }
}

impl From<Weekly> for RRule {
    fn from(weekly: Weekly) -> Self {
        RRule::Weekly(weekly)
    }
}

impl From<Daily> for RRule {
    fn from(daily: Daily) -> Self {
        RRule::Daily(daily)
    }
}

impl FromStr for RRule {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        json::read(text)
    }
}

/// Occurrences of a rule over a date window, expanded one date at a time.
///
/// Cloning yields an independent iterator that resumes from the same point.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RRule,
    dates: DateIterator,
    pending: std::vec::IntoIter<NaiveDateTime>,
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        loop {
            if let Some(next) = self.pending.next() {
                return Some(next);
            }

            let date = self.dates.next()?;
            let mut expanded = Vec::new();
            self.rule.expand(date, &mut expanded);
            self.pending = expanded.into_iter();
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::{Ordinal, TimeOfDay};
    use chrono::{Datelike as _, Weekday};

    #[test_log::test]
    fn daily_with_two_times() {
        let mut daily = Daily::new();
        daily.hour(9).unwrap();
        daily.hour(12).unwrap().set_minute(30).unwrap();
        let rule = RRule::from(daily);

        let all: Vec<_> = rule
            .occurrences(date(2000, 1, 1), date(2000, 1, 2))
            .unwrap()
            .collect();

        assert_eq!(
            all,
            vec![
                at(2000, 1, 1, 9, 0, 0),
                at(2000, 1, 1, 12, 30, 0),
                at(2000, 1, 2, 9, 0, 0),
                at(2000, 1, 2, 12, 30, 0),
            ]
        );
    }

    #[test]
    fn every_day() {
        let all: Vec<_> = RRule::every_day()
            .occurrences(date(2000, 1, 1), date(2000, 1, 3))
            .unwrap()
            .collect();

        assert_eq!(
            all,
            vec![midnight(2000, 1, 1), midnight(2000, 1, 2), midnight(2000, 1, 3)]
        );
    }

    #[test]
    fn every_week_defaults_to_sunday() {
        let all: Vec<_> = RRule::every_week()
            .occurrences(date(2000, 1, 1), date(2000, 1, 31))
            .unwrap()
            .collect();

        assert_eq!(
            all,
            vec![
                midnight(2000, 1, 2),
                midnight(2000, 1, 9),
                midnight(2000, 1, 16),
                midnight(2000, 1, 23),
                midnight(2000, 1, 30),
            ]
        );
    }

    #[test]
    fn every_month_the() {
        let mut monthly = Monthly::new();
        monthly.day(31).unwrap();
        monthly
            .day(15)
            .unwrap()
            .at(TimeOfDay::new(10, 15, 30).unwrap());
        monthly
            .nth_weekday(Ordinal::Second, Weekday::Tue)
            .at(TimeOfDay::new(9, 20, 45).unwrap());
        monthly.nth_weekday(Ordinal::Last, Weekday::Fri);
        let rule = RRule::from(monthly);

        let all: Vec<_> = rule
            .occurrences(date(2000, 1, 1), date(2000, 3, 1))
            .unwrap()
            .collect();

        assert_eq!(
            all,
            vec![
                at(2000, 1, 11, 9, 20, 45),
                at(2000, 1, 15, 10, 15, 30),
                midnight(2000, 1, 28),
                midnight(2000, 1, 31),
                at(2000, 2, 8, 9, 20, 45),
                at(2000, 2, 15, 10, 15, 30),
                midnight(2000, 2, 25),
            ]
        );
    }

    #[test]
    fn every_year() {
        let all: Vec<_> = RRule::every_year()
            .occurrences(date(2000, 1, 1), date(2002, 6, 1))
            .unwrap()
            .collect();

        assert_eq!(
            all,
            vec![midnight(2000, 1, 1), midnight(2001, 1, 1), midnight(2002, 1, 1)]
        );
    }

    #[test]
    fn reversed_window() {
        let rule = RRule::every_day();
        assert!(matches!(
            rule.occurrences(date(2000, 1, 2), date(2000, 1, 1)),
            Err(Error::InvalidWindow { .. })
        ));
    }

    #[test]
    fn single_day_window() {
        let all: Vec<_> = RRule::every_day()
            .occurrences(date(2000, 1, 1), date(2000, 1, 1))
            .unwrap()
            .collect();
        assert_eq!(all, vec![midnight(2000, 1, 1)]);
    }

    #[test]
    fn stays_within_window() {
        let mut weekly = Weekly::new();
        for weekday in crate::calendar::WEEKDAYS {
            weekly.on(weekday).hour(23).unwrap().set_minute(59).unwrap();
        }
        let rule = RRule::from(weekly);

        let from = date(2000, 2, 27);
        let to = date(2000, 3, 2);
        let all: Vec<_> = rule.occurrences(from, to).unwrap().collect();

        assert_eq!(all.len(), 5);
        for (occurrence, expected) in all.iter().zip(DateIterator::new(from, to)) {
            assert_eq!(occurrence.date(), expected);
            assert_eq!(occurrence.weekday(), expected.weekday());
        }
    }

    #[test]
    fn restartable() {
        let rule = RRule::every_week();
        let mut occurrences = rule.occurrences(date(2000, 1, 1), date(2000, 1, 31)).unwrap();
        occurrences.next();

        let resumed: Vec<_> = occurrences.clone().collect();
        assert_eq!(resumed.len(), 4);
        assert_eq!(occurrences.collect::<Vec<_>>(), resumed);

        let first = rule.occurrences(date(2000, 1, 1), date(2000, 1, 31)).unwrap();
        let second = rule.occurrences(date(2000, 1, 1), date(2000, 1, 31)).unwrap();
        assert!(first.eq(second));
    }

    #[test]
    fn level() {
        assert_eq!(RRule::every_year().level(), Level::Yearly);
        assert_eq!(RRule::every_month().level(), Level::Monthly);
        assert_eq!(RRule::every_week().level(), Level::Weekly);
        assert_eq!(RRule::every_day().level(), Level::Daily);
    }
}
