//! The exchange format: one outer object keyed by the root level, nesting a
//! keyed object per level.
//!
//! ```json
//! {"Yearly":{"In":{"April":{"The":{"15":{"At":{"Time0":{"Hour":0,"Minute":0,"Second":0}}},
//!   "Second-Friday":{"At":{"Time0":{"Hour":9,"Minute":30,"Second":0}}}}}}}}
//! ```

mod reader;
mod writer;

use crate::{RRule, Result};
use std::io;

pub const DAILY_KEY: &str = "Daily";
pub const DAILY_AT_KEY: &str = "At";
pub const HOUR_KEY: &str = "Hour";
pub const MINUTE_KEY: &str = "Minute";
pub const SECOND_KEY: &str = "Second";
pub const WEEKLY_KEY: &str = "Weekly";
pub const WEEKLY_ON_KEY: &str = "On";
pub const MONTHLY_KEY: &str = "Monthly";
pub const MONTHLY_THE_KEY: &str = "The";
pub const YEARLY_KEY: &str = "Yearly";
pub const YEARLY_IN_KEY: &str = "In";

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Indent nested objects instead of writing a single line.
    pub pretty: bool,
}

/// Writes `rule` with every empty level replaced by its default, so the
/// output always spells out the occurrences it stands for.
pub fn write(rule: &RRule, options: &WriteOptions) -> Result<String> {
    tracing::debug!(level = %rule.level(), pretty = options.pretty, "writing recurrence");

    let text = if options.pretty {
        serde_json::to_string_pretty(rule)?
    } else {
        serde_json::to_string(rule)?
    };
    Ok(text)
}

pub fn write_to<W: io::Write>(writer: W, rule: &RRule, options: &WriteOptions) -> Result<()> {
    tracing::debug!(level = %rule.level(), pretty = options.pretty, "writing recurrence");

    if options.pretty {
        serde_json::to_writer_pretty(writer, rule)?;
    } else {
        serde_json::to_writer(writer, rule)?;
    }
    Ok(())
}

pub fn read(text: &str) -> Result<RRule> {
    logged(reader::read(&mut serde_json::Deserializer::from_str(text)))
}

/// Reads a rule straight off `reader`, without buffering the whole text.
pub fn read_from<R: io::Read>(reader: R) -> Result<RRule> {
    logged(reader::read(&mut serde_json::Deserializer::from_reader(reader)))
}

fn logged(result: Result<RRule>) -> Result<RRule> {
    match &result {
        Ok(rule) => tracing::debug!(level = %rule.level(), "read recurrence"),
        Err(error) => tracing::debug!(%error, "failed to read recurrence"),
    }
    result
}

/// Like [`read`], but discards the reason the text was rejected.
pub fn try_read(text: &str) -> Option<RRule> {
    read(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::{Daily, Monthly, Ordinal, TimeOfDay, Weekly, Yearly};
    use chrono::{NaiveDate, Weekday};

    fn assert_round_trip(rule: &RRule, from: NaiveDate, to: NaiveDate) {
        for options in [WriteOptions { pretty: false }, WriteOptions { pretty: true }] {
            let text = write(rule, &options).unwrap();
            let parsed = read(&text).unwrap();

            assert_eq!(parsed.level(), rule.level());
            let expected: Vec<_> = rule.occurrences(from, to).unwrap().collect();
            let actual: Vec<_> = parsed.occurrences(from, to).unwrap().collect();
            assert_eq!(actual, expected, "{text}");
        }
    }

    #[test]
    fn round_trip_defaults() {
        for rule in [
            RRule::every_year(),
            RRule::every_month(),
            RRule::every_week(),
            RRule::every_day(),
        ] {
            assert_round_trip(&rule, date(2000, 1, 1), date(2001, 12, 31));
        }
    }

    #[test]
    fn round_trip_daily() {
        let mut daily = Daily::new();
        daily.at(TimeOfDay::new(17, 30, 45).unwrap());
        daily.at(TimeOfDay::new(10, 15, 30).unwrap());
        assert_round_trip(&daily.into(), date(2000, 1, 1), date(2000, 1, 10));
    }

    #[test]
    fn round_trip_weekly() {
        let mut weekly = Weekly::new();
        for weekday in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu] {
            weekly.on(weekday);
        }
        weekly.on(Weekday::Sun).hour(17).unwrap().set_minute(30).unwrap();
        // the same weekday attached twice survives as two entries
        weekly.on(Weekday::Mon).hour(6).unwrap();
        assert_round_trip(&weekly.into(), date(2000, 1, 1), date(2000, 2, 29));
    }

    #[test]
    fn round_trip_monthly() {
        let mut monthly = Monthly::new();
        monthly.day(15).unwrap();
        for ordinal in Ordinal::ALL {
            for weekday in crate::calendar::WEEKDAYS {
                monthly.nth_weekday(ordinal, weekday);
            }
        }
        monthly
            .nth_weekday(Ordinal::Last, Weekday::Sun)
            .hour(17)
            .unwrap()
            .set_minute(30)
            .unwrap()
            .set_second(45)
            .unwrap();
        assert_round_trip(&monthly.into(), date(2000, 1, 1), date(2000, 12, 31));
    }

    #[test]
    fn round_trip_yearly() {
        let mut yearly = Yearly::new();
        for month in 1..=10 {
            yearly.month(month).unwrap();
        }
        yearly.month(11).unwrap().day(15).unwrap();
        yearly
            .month(12)
            .unwrap()
            .nth_weekday(Ordinal::Fourth, Weekday::Mon)
            .hour(9)
            .unwrap()
            .set_minute(15)
            .unwrap()
            .set_second(30)
            .unwrap();
        assert_round_trip(&yearly.into(), date(2000, 1, 1), date(2003, 12, 31));
    }

    #[test]
    fn write_to_and_read_from_streams() {
        let mut monthly = Monthly::new();
        monthly.day(2).unwrap().hour(8).unwrap();
        let rule = RRule::from(monthly);

        let mut buffer = Vec::new();
        write_to(&mut buffer, &rule, &WriteOptions { pretty: true }).unwrap();
        let parsed = read_from(buffer.as_slice()).unwrap();

        assert_eq!(parsed, rule);
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Meeting {
        name: String,
        rule: RRule,
    }

    #[test]
    fn round_trip_inside_a_document() {
        let mut monthly = Monthly::new();
        monthly.nth_weekday(Ordinal::Last, Weekday::Wed).hour(9).unwrap();
        monthly.nth_weekday(Ordinal::Fourth, Weekday::Wed).hour(8).unwrap();
        let meeting = Meeting {
            name: "retro".to_owned(),
            rule: monthly.into(),
        };

        let text = serde_json::to_string(&meeting).unwrap();
        let parsed: Meeting = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed.name, "retro");
        // February 2000 has four Wednesdays, so the 23rd is both fourth and last
        let expected: Vec<_> = meeting
            .rule
            .occurrences(date(2000, 2, 1), date(2000, 2, 29))
            .unwrap()
            .collect();
        assert_eq!(expected, vec![at(2000, 2, 23, 9, 0, 0), at(2000, 2, 23, 8, 0, 0)]);
        let actual: Vec<_> = parsed
            .rule
            .occurrences(date(2000, 2, 1), date(2000, 2, 29))
            .unwrap()
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn try_read_rejects_empty_object() {
        assert!(try_read("{}").is_none());
        assert!(try_read(&RRule::every_year().to_json().unwrap()).is_some());
    }
}
