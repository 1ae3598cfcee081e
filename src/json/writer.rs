use super::{
    DAILY_AT_KEY, HOUR_KEY, MINUTE_KEY, MONTHLY_THE_KEY, SECOND_KEY, WEEKLY_ON_KEY,
    YEARLY_IN_KEY,
};
use crate::calendar::{month_name, weekday_name};
use crate::{Daily, DaySelector, MonthDay, Monthly, RRule, TimeOfDay, WeekDay, Weekly, YearMonth, Yearly};
use serde::ser::{SerializeMap as _, SerializeStruct as _};
use serde::{Serialize, Serializer};

impl Serialize for RRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let key = self.level().key();
        match self {
            RRule::Yearly(yearly) => map.serialize_entry(key, yearly)?,
            RRule::Monthly(monthly) => map.serialize_entry(key, monthly)?,
            RRule::Weekly(weekly) => map.serialize_entry(key, weekly)?,
            RRule::Daily(daily) => map.serialize_entry(key, daily)?,
        }
        map.end()
    }
}

impl Serialize for Yearly {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(YEARLY_IN_KEY, &In(self.resolved_months()))?;
        map.end()
    }
}

struct In<'a>(&'a [YearMonth]);

impl Serialize for In<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|month| (month_name(month.month()), month.monthly())),
        )
    }
}

impl Serialize for Monthly {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(MONTHLY_THE_KEY, &The(self))?;
        map.end()
    }
}

struct The<'a>(&'a Monthly);

impl Serialize for The<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .resolved_days()
                .map(|day: &MonthDay| (selector_key(day.selector()), day.daily())),
        )
    }
}

/// `"15"` for a day of the month, `"Second-Friday"` for an nth weekday.
fn selector_key(selector: DaySelector) -> String {
    match selector {
        DaySelector::DayOfMonth(day) => day.to_string(),
        DaySelector::NthWeekday(ordinal, weekday) => {
            format!("{}-{}", ordinal.name(), weekday_name(weekday))
        }
    }
}

impl Serialize for Weekly {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(WEEKLY_ON_KEY, &On(self.resolved_days()))?;
        map.end()
    }
}

struct On<'a>(&'a [WeekDay]);

impl Serialize for On<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|day| (weekday_name(day.weekday()), day.daily())),
        )
    }
}

impl Serialize for Daily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(DAILY_AT_KEY, &At(self.resolved_times()))?;
        map.end()
    }
}

struct At<'a>(&'a [TimeOfDay]);

impl Serialize for At<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // labels only keep entries apart, the reader ignores them
        serializer.collect_map(
            self.0
                .iter()
                .enumerate()
                .map(|(index, time)| (format!("Time{index}"), time)),
        )
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut time = serializer.serialize_struct("TimeOfDay", 3)?;
        time.serialize_field(HOUR_KEY, &self.hour())?;
        time.serialize_field(MINUTE_KEY, &self.minute())?;
        time.serialize_field(SECOND_KEY, &self.second())?;
        time.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{write, WriteOptions};
    use crate::Ordinal;
    use chrono::Weekday;

    const MIDNIGHT_AT: &str = r#"{"At":{"Time0":{"Hour":0,"Minute":0,"Second":0}}}"#;

    fn compact(rule: &RRule) -> String {
        write(rule, &WriteOptions::default()).unwrap()
    }

    #[test]
    fn every_day_spells_out_midnight() {
        let rule = RRule::every_day();
        let first = compact(&rule);
        let second = compact(&rule);

        assert_eq!(first, format!(r#"{{"Daily":{MIDNIGHT_AT}}}"#));
        assert_eq!(first, second);
        // writing never fills in the authored tree
        assert_eq!(rule, RRule::every_day());
    }

    #[test]
    fn every_week() {
        assert_eq!(
            compact(&RRule::every_week()),
            format!(r#"{{"Weekly":{{"On":{{"Sunday":{MIDNIGHT_AT}}}}}}}"#)
        );
    }

    #[test]
    fn every_month() {
        assert_eq!(
            compact(&RRule::every_month()),
            format!(r#"{{"Monthly":{{"The":{{"1":{MIDNIGHT_AT}}}}}}}"#)
        );
    }

    #[test]
    fn every_year() {
        assert_eq!(
            compact(&RRule::every_year()),
            format!(r#"{{"Yearly":{{"In":{{"January":{{"The":{{"1":{MIDNIGHT_AT}}}}}}}}}}}"#)
        );
    }

    #[test]
    fn times_keep_their_order() {
        let mut daily = Daily::new();
        daily.at(TimeOfDay::new(17, 30, 45).unwrap());
        daily.at(TimeOfDay::new(10, 15, 30).unwrap());

        assert_eq!(
            compact(&daily.into()),
            concat!(
                r#"{"Daily":{"At":{"#,
                r#""Time0":{"Hour":17,"Minute":30,"Second":45},"#,
                r#""Time1":{"Hour":10,"Minute":15,"Second":30}"#,
                r#"}}}"#,
            )
        );
    }

    #[test]
    fn monthly_keys() {
        let mut monthly = Monthly::new();
        monthly.nth_weekday(Ordinal::Second, Weekday::Fri);
        monthly.day(15).unwrap();

        assert_eq!(
            compact(&monthly.into()),
            format!(r#"{{"Monthly":{{"The":{{"15":{MIDNIGHT_AT},"Second-Friday":{MIDNIGHT_AT}}}}}}}"#)
        );
    }

    #[test]
    fn yearly_month_names() {
        let mut yearly = Yearly::new();
        yearly.month(12).unwrap();
        yearly.month(4).unwrap().nth_weekday(Ordinal::Last, Weekday::Mon);

        let expected = format!(
            r#"{{"Yearly":{{"In":{{"December":{{"The":{{"1":{MIDNIGHT_AT}}}}},"April":{{"The":{{"Last-Monday":{MIDNIGHT_AT}}}}}}}}}}}"#
        );
        assert_eq!(compact(&yearly.into()), expected);
    }

    #[test]
    fn pretty_output_is_indented() {
        let text = write(&RRule::every_day(), &WriteOptions { pretty: true }).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains(r#""Hour": 0"#));
    }

    #[test]
    fn embeds_in_other_documents() {
        let document = serde_json::json!({ "name": "standup", "rule": RRule::every_week() });
        assert_eq!(
            document["rule"]["Weekly"]["On"]["Sunday"]["At"]["Time0"]["Hour"],
            serde_json::json!(0)
        );
    }
}
