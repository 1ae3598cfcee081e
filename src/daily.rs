use crate::{defaults, Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike as _};

/// One instant within a day: the hour, minute and second chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(NaiveTime::MIN);

    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self> {
        let mut time = TimeOfDay::MIDNIGHT;
        time.set_hour(hour)?.set_minute(minute)?.set_second(second)?;
        Ok(time)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn hms(&self) -> (u32, u32, u32) {
        (self.hour(), self.minute(), self.second())
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    fn set_hour(&mut self, hour: u32) -> Result<&mut Self> {
        self.0 = self
            .0
            .with_hour(hour)
            .ok_or_else(|| Error::out_of_range("hour", hour, 0, 23))?;
        Ok(self)
    }

    pub fn set_minute(&mut self, minute: u32) -> Result<&mut Self> {
        self.0 = self
            .0
            .with_minute(minute)
            .ok_or_else(|| Error::out_of_range("minute", minute, 0, 59))?;
        Ok(self)
    }

    pub fn set_second(&mut self, second: u32) -> Result<&mut Self> {
        self.0 = self
            .0
            .with_second(second)
            .ok_or_else(|| Error::out_of_range("second", second, 0, 59))?;
        Ok(self)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        TimeOfDay::MIDNIGHT
    }
}

/// A day of occurrences, listing the times of day it fires at.
///
/// With no times attached the day fires once, at midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Daily {
    at: Vec<TimeOfDay>,
}

impl Daily {
    pub const fn new() -> Self {
        Daily { at: Vec::new() }
    }

    /// Attaches a time at `hour`:00:00 and returns it so that minute and
    /// second can be set.
    pub fn hour(&mut self, hour: u32) -> Result<&mut TimeOfDay> {
        let time = TimeOfDay::new(hour, 0, 0)?;
        Ok(self.push(time))
    }

    pub fn at(&mut self, time: TimeOfDay) -> &mut Self {
        self.push(time);
        self
    }

    fn push(&mut self, time: TimeOfDay) -> &mut TimeOfDay {
        self.at.push(time);
        let last = self.at.len() - 1;
        &mut self.at[last]
    }

    /// Times as attached, possibly empty.
    pub fn times(&self) -> &[TimeOfDay] {
        &self.at
    }

    pub fn resolved_times(&self) -> &[TimeOfDay] {
        if self.at.is_empty() {
            &defaults::TIMES
        } else {
            &self.at
        }
    }

    /// Appends every time of day on `date`, in the order they were attached.
    pub(crate) fn expand(&self, date: NaiveDate, out: &mut Vec<NaiveDateTime>) {
        out.extend(
            self.resolved_times()
                .iter()
                .map(|time| date.and_time(time.as_naive_time())),
        );
    }
}
