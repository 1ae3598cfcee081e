use crate::{defaults, Daily};
use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Weekday};

/// A day of the week and the times it fires at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    weekday: Weekday,
    daily: Daily,
}

impl WeekDay {
    pub const fn new(weekday: Weekday, daily: Daily) -> Self {
        WeekDay { weekday, daily }
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn daily(&self) -> &Daily {
        &self.daily
    }
}

/// Every week, on the attached days.
///
/// With no days attached the week fires on Sunday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Weekly {
    on: Vec<WeekDay>,
}

impl Weekly {
    pub const fn new() -> Self {
        Weekly { on: Vec::new() }
    }

    pub fn on(&mut self, weekday: Weekday) -> &mut Daily {
        self.on.push(WeekDay::new(weekday, Daily::new()));
        let last = self.on.len() - 1;
        &mut self.on[last].daily
    }

    pub fn days(&self) -> &[WeekDay] {
        &self.on
    }

    pub fn resolved_days(&self) -> &[WeekDay] {
        if self.on.is_empty() {
            &defaults::WEEK_DAYS
        } else {
            &self.on
        }
    }

    pub(crate) fn expand(&self, date: NaiveDate, out: &mut Vec<NaiveDateTime>) {
        for day in self.resolved_days() {
            if day.weekday == date.weekday() {
                day.daily.expand(date, out);
            }
        }
    }
}
