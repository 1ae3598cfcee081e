use chrono::NaiveDate;
use std::iter::FusedIterator;

/// Walks every calendar date from `cursor` to `end`, both inclusive.
#[derive(Debug, Clone)]
pub struct DateIterator {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateIterator {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        DateIterator {
            cursor: Some(from).filter(|from| *from <= to),
            end: to,
        }
    }
}

impl Iterator for DateIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.cursor?;

        // succ_opt is None only at NaiveDate::MAX, which ends the walk too
        self.cursor = current.succ_opt().filter(|next| *next <= self.end);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(cursor) => {
                let remaining = (self.end - cursor).num_days() as usize + 1;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for DateIterator {}

impl FusedIterator for DateIterator {}
