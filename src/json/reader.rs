//! Reads the exchange format through serde, one map visitor per level.
//!
//! Each visitor pulls the properties of its own object and hands back control
//! once that object closes, so the text is read in a single forward pass and
//! nothing but the finished tree is kept. Nesting depth is the call depth of
//! the visitors.

use super::{
    DAILY_AT_KEY, HOUR_KEY, MINUTE_KEY, MONTHLY_THE_KEY, SECOND_KEY, WEEKLY_ON_KEY,
    YEARLY_IN_KEY,
};
use crate::{
    calendar, Daily, DaySelector, Error, Level, Monthly, Ordinal, ParseError, ParseErrorKind,
    RRule, TimeOfDay, Weekly, Yearly,
};
use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::error::Category;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

/// Reads one rule and requires nothing but whitespace after it.
pub(super) fn read<'de, R>(deserializer: &mut serde_json::Deserializer<R>) -> crate::Result<RRule>
where
    R: serde_json::de::Read<'de>,
{
    let rejection = Rejection::default();
    let rule = Seed::<RRule>::new(&rejection)
        .deserialize(&mut *deserializer)
        .and_then(|rule| deserializer.end().map(|()| rule));

    rule.map_err(|error| rejection.into_error(error))
}

/// The typed reason a visitor gave up. A serde error only keeps its message,
/// so the kind is parked here until the error reaches [`read`].
#[derive(Default)]
struct Rejection(Cell<Option<ParseErrorKind>>);

impl Rejection {
    fn reject<E: de::Error>(&self, kind: ParseErrorKind) -> E {
        let error = E::custom(&kind);
        self.0.set(Some(kind));
        error
    }

    fn into_error(self, error: serde_json::Error) -> Error {
        let kind = match error.classify() {
            Category::Io => return Error::Io(error.into()),
            Category::Eof => ParseErrorKind::UnexpectedEof,
            Category::Syntax => ParseErrorKind::Syntax(message(&error)),
            Category::Data => self
                .0
                .into_inner()
                .unwrap_or_else(|| ParseErrorKind::InvalidValue(message(&error))),
        };
        ParseError::new(kind, error.line(), error.column()).into()
    }
}

/// The error text without the position serde_json appends to it.
fn message(error: &serde_json::Error) -> String {
    let text = error.to_string();
    let position = format!(" at line {} column {}", error.line(), error.column());
    match text.strip_suffix(&position) {
        Some(message) => message.to_owned(),
        None => text,
    }
}

// Tags for the keyed entry objects nested in each level body.
enum Months {}
enum Selections {}
enum WeekDays {}
enum Times {}

/// Visitor for whatever `T` tags, sharing one [`Rejection`] down the tree.
struct Seed<'r, T> {
    rejection: &'r Rejection,
    tag: PhantomData<fn() -> T>,
}

impl<'r, T> Seed<'r, T> {
    fn new(rejection: &'r Rejection) -> Self {
        Seed {
            rejection,
            tag: PhantomData,
        }
    }

    fn to<U>(self) -> Seed<'r, U> {
        Seed::new(self.rejection)
    }

    fn reject<E: de::Error>(self, kind: ParseErrorKind) -> E {
        self.rejection.reject(kind)
    }
}

impl<T> Clone for Seed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Seed<'_, T> {}

impl<'de, 'r, T> DeserializeSeed<'de> for Seed<'r, T>
where
    Seed<'r, T>: Visitor<'de>,
{
    type Value = <Seed<'r, T> as Visitor<'de>>::Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

macro_rules! deserialize_with_seed {
    ($($ty:ty),* $(,)?) => {$(
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Seed::<$ty>::new(&Rejection::default()).deserialize(deserializer)
            }
        }
    )*};
}

deserialize_with_seed!(RRule, Yearly, Monthly, Weekly, Daily, TimeOfDay);

impl<'de> Visitor<'de> for Seed<'_, RRule> {
    type Value = RRule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by a recurrence level")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RRule, A::Error> {
        let key: String = map
            .next_key()?
            .ok_or_else(|| self.reject::<A::Error>(ParseErrorKind::MissingLevel))?;
        let level = Level::from_key(&key)
            .ok_or_else(|| self.reject::<A::Error>(ParseErrorKind::UnknownLevel(key)))?;

        let rule = match level {
            Level::Yearly => RRule::Yearly(map.next_value_seed(self.to::<Yearly>())?),
            Level::Monthly => RRule::Monthly(map.next_value_seed(self.to::<Monthly>())?),
            Level::Weekly => RRule::Weekly(map.next_value_seed(self.to::<Weekly>())?),
            Level::Daily => RRule::Daily(map.next_value_seed(self.to::<Daily>())?),
        };

        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(self.reject(ParseErrorKind::MultipleLevels));
        }
        Ok(rule)
    }
}

/// Reads a level body, `{"<marker>": {...}}`, handing the marker's value to
/// `entries`. Other properties of the body are skipped.
fn body<'de, A, S>(
    map: &mut A,
    entries: S,
    marker: &'static str,
    rejection: &Rejection,
) -> Result<S::Value, A::Error>
where
    A: MapAccess<'de>,
    S: DeserializeSeed<'de> + Copy,
{
    let mut found = None;
    while let Some(key) = map.next_key::<String>()? {
        if key != marker {
            tracing::trace!(%key, "skipping unknown property");
            map.next_value::<IgnoredAny>()?;
        } else if found.is_some() {
            return Err(rejection.reject(ParseErrorKind::DuplicateKey(marker)));
        } else {
            found = Some(map.next_value_seed(entries)?);
        }
    }

    found.ok_or_else(|| rejection.reject(ParseErrorKind::MissingKey(marker)))
}

impl<'de> Visitor<'de> for Seed<'_, Yearly> {
    type Value = Yearly;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a yearly body with `{YEARLY_IN_KEY}`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Yearly, A::Error> {
        body(&mut map, self.to::<Months>(), YEARLY_IN_KEY, self.rejection)
    }
}

impl<'de> Visitor<'de> for Seed<'_, Months> {
    type Value = Yearly;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by month name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Yearly, A::Error> {
        let mut yearly = Yearly::new();
        while let Some(key) = map.next_key::<String>()? {
            tracing::trace!(%key, "reading month");
            let month = calendar::month_from_name(&key)
                .ok_or_else(|| self.reject::<A::Error>(ParseErrorKind::UnknownMonth(key)))?;
            let monthly = map.next_value_seed(self.to::<Monthly>())?;
            *yearly.in_month(month) = monthly;
        }
        Ok(yearly)
    }
}

impl<'de> Visitor<'de> for Seed<'_, Monthly> {
    type Value = Monthly;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a monthly body with `{MONTHLY_THE_KEY}`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Monthly, A::Error> {
        body(&mut map, self.to::<Selections>(), MONTHLY_THE_KEY, self.rejection)
    }
}

impl<'de> Visitor<'de> for Seed<'_, Selections> {
    type Value = Monthly;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by day of month or ordinal weekday")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Monthly, A::Error> {
        let mut monthly = Monthly::new();
        while let Some(key) = map.next_key::<String>()? {
            tracing::trace!(%key, "reading day selector");
            let selector = day_selector(&key).map_err(|kind| self.reject::<A::Error>(kind))?;
            let daily = map.next_value_seed(self.to::<Daily>())?;
            *monthly.select(selector) = daily;
        }
        Ok(monthly)
    }
}

impl<'de> Visitor<'de> for Seed<'_, Weekly> {
    type Value = Weekly;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a weekly body with `{WEEKLY_ON_KEY}`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Weekly, A::Error> {
        body(&mut map, self.to::<WeekDays>(), WEEKLY_ON_KEY, self.rejection)
    }
}

impl<'de> Visitor<'de> for Seed<'_, WeekDays> {
    type Value = Weekly;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by weekday name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Weekly, A::Error> {
        let mut weekly = Weekly::new();
        while let Some(key) = map.next_key::<String>()? {
            tracing::trace!(%key, "reading weekday");
            let weekday = calendar::weekday_from_name(&key)
                .ok_or_else(|| self.reject::<A::Error>(ParseErrorKind::UnknownWeekday(key)))?;
            let daily = map.next_value_seed(self.to::<Daily>())?;
            *weekly.on(weekday) = daily;
        }
        Ok(weekly)
    }
}

impl<'de> Visitor<'de> for Seed<'_, Daily> {
    type Value = Daily;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a daily body with `{DAILY_AT_KEY}`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Daily, A::Error> {
        body(&mut map, self.to::<Times>(), DAILY_AT_KEY, self.rejection)
    }
}

impl<'de> Visitor<'de> for Seed<'_, Times> {
    type Value = Daily;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of times of day")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Daily, A::Error> {
        let mut daily = Daily::new();
        // entry labels carry no meaning, only their order does
        while map.next_key::<IgnoredAny>()?.is_some() {
            daily.at(map.next_value_seed(self.to::<TimeOfDay>())?);
        }
        Ok(daily)
    }
}

impl<'de> Visitor<'de> for Seed<'_, TimeOfDay> {
    type Value = TimeOfDay;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with `{HOUR_KEY}`, `{MINUTE_KEY}` and `{SECOND_KEY}`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TimeOfDay, A::Error> {
        let (mut hour, mut minute, mut second) = (None, None, None);
        while let Some(key) = map.next_key::<String>()? {
            let (slot, field) = match key.as_str() {
                HOUR_KEY => (&mut hour, HOUR_KEY),
                MINUTE_KEY => (&mut minute, MINUTE_KEY),
                SECOND_KEY => (&mut second, SECOND_KEY),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if slot.is_some() {
                return Err(self.reject(ParseErrorKind::DuplicateKey(field)));
            }
            *slot = Some(map.next_value::<u32>()?);
        }

        let missing = |field| self.reject::<A::Error>(ParseErrorKind::MissingKey(field));
        let hour = hour.ok_or_else(|| missing(HOUR_KEY))?;
        let minute = minute.ok_or_else(|| missing(MINUTE_KEY))?;
        let second = second.ok_or_else(|| missing(SECOND_KEY))?;

        TimeOfDay::new(hour, minute, second).map_err(|error| self.reject(out_of_range(error)))
    }
}

/// `"15"` selects a day of the month, `"Second-Friday"` an nth weekday.
fn day_selector(key: &str) -> Result<DaySelector, ParseErrorKind> {
    if let Ok(day) = key.parse::<u32>() {
        return DaySelector::day_of_month(day).map_err(out_of_range);
    }

    let (ordinal, weekday) = key
        .split_once('-')
        .ok_or_else(|| ParseErrorKind::InvalidDaySelector(key.to_owned()))?;
    let ordinal = Ordinal::from_name(ordinal)
        .ok_or_else(|| ParseErrorKind::UnknownOrdinal(ordinal.to_owned()))?;
    let weekday = calendar::weekday_from_name(weekday)
        .ok_or_else(|| ParseErrorKind::UnknownWeekday(weekday.to_owned()))?;

    Ok(DaySelector::NthWeekday(ordinal, weekday))
}

fn out_of_range(error: Error) -> ParseErrorKind {
    match error {
        Error::OutOfRange { field, value, .. } => ParseErrorKind::OutOfRange { field, value },
        other => ParseErrorKind::InvalidValue(other.to_string()),
    }
}
