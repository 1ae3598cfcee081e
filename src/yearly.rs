use crate::{calendar, defaults, Error, Monthly, Result};
use chrono::{Month, NaiveDate, NaiveDateTime};

/// A month of the year and the days it fires on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearMonth {
    month: Month,
    monthly: Monthly,
}

impl YearMonth {
    pub const fn new(month: Month, monthly: Monthly) -> Self {
        YearMonth { month, monthly }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn monthly(&self) -> &Monthly {
        &self.monthly
    }
}

/// Every year, in the attached months.
///
/// With no months attached the year fires in January.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Yearly {
    months: Vec<YearMonth>,
}

impl Yearly {
    pub const fn new() -> Self {
        Yearly { months: Vec::new() }
    }

    /// Attaches a month by number, 1 for January through 12 for December.
    pub fn month(&mut self, month: u32) -> Result<&mut Monthly> {
        let month = calendar::month_from_number(month)
            .ok_or_else(|| Error::out_of_range("month", month, 1, 12))?;
        Ok(self.in_month(month))
    }

    pub fn in_month(&mut self, month: Month) -> &mut Monthly {
        self.months.push(YearMonth::new(month, Monthly::new()));
        let last = self.months.len() - 1;
        &mut self.months[last].monthly
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn resolved_months(&self) -> &[YearMonth] {
        if self.months.is_empty() {
            &defaults::MONTHS
        } else {
            &self.months
        }
    }

    pub(crate) fn expand(&self, date: NaiveDate, out: &mut Vec<NaiveDateTime>) {
        let month = calendar::month_of(date);
        for year_month in self.resolved_months() {
            if year_month.month == month {
                year_month.monthly.expand(date, out);
            }
        }
    }
}
