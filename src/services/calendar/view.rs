// View kinds
// Calendar layouts and their page navigation

use std::fmt;

use chrono::{Duration, Months, NaiveDate};

/// Calendar view kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Month,
    Week,
    WorkWeek,
    Day,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Month,
        ViewKind::Week,
        ViewKind::WorkWeek,
        ViewKind::Day,
    ];

    /// Move `date` by `steps` pages of this view, negative for back.
    ///
    /// Month pages keep the day-of-month where the target month has it and
    /// clamp to its last day otherwise. At the edge of the representable
    /// calendar range the date stays put.
    pub fn advance(self, date: NaiveDate, steps: i32) -> NaiveDate {
        let stepped = match self {
            ViewKind::Month => {
                let magnitude = Months::new(steps.unsigned_abs());
                if steps >= 0 {
                    date.checked_add_months(magnitude)
                } else {
                    date.checked_sub_months(magnitude)
                }
            }
            ViewKind::Week | ViewKind::WorkWeek => {
                date.checked_add_signed(Duration::weeks(i64::from(steps)))
            }
            ViewKind::Day => date.checked_add_signed(Duration::days(i64::from(steps))),
        };
        stepped.unwrap_or(date)
    }

    pub fn next(self, date: NaiveDate) -> NaiveDate {
        self.advance(date, 1)
    }

    pub fn previous(self, date: NaiveDate) -> NaiveDate {
        self.advance(date, -1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Month => "Month",
            ViewKind::Week => "Week",
            ViewKind::WorkWeek => "Work Week",
            ViewKind::Day => "Day",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
