use chrono::{Datelike, Duration, Months, NaiveDateTime};

use crate::models::recurrence::Recurrence;

impl Recurrence {
    /// Advance `origin` by `periods` repeats of this frequency.
    ///
    /// Monthly and yearly steps are always measured from `origin` rather
    /// than chained, so the origin's day-of-month is preserved wherever the
    /// target month has it and clamped to the month's last day where it
    /// does not (Jan 31 stepped one month lands on Feb 28 or 29). A yearly
    /// step is twelve monthly steps and clamps the same way.
    ///
    /// Returns `None` outside the representable calendar range.
    pub fn step(self, origin: NaiveDateTime, periods: i64) -> Option<NaiveDateTime> {
        match self {
            Recurrence::Daily => origin.checked_add_signed(Duration::try_days(periods)?),
            Recurrence::Weekly => origin.checked_add_signed(Duration::try_weeks(periods)?),
            Recurrence::Monthly => step_months(origin, periods),
            Recurrence::Yearly => step_months(origin, periods.checked_mul(12)?),
        }
    }

    /// Whole periods of this frequency from `origin` to `reference`.
    ///
    /// Daily and weekly counts divide the exact elapsed time. Monthly and
    /// yearly counts are raw calendar-unit differences, which overshoot the
    /// true period count by one when `reference` sits earlier within its
    /// month or year than `origin` does; [`occurrence_start_before`] pairs
    /// the estimate with a correction step.
    ///
    /// [`occurrence_start_before`]: super::occurrence_start_before
    pub fn elapsed_periods(self, origin: NaiveDateTime, reference: NaiveDateTime) -> i64 {
        match self {
            Recurrence::Daily => (reference - origin).num_days(),
            Recurrence::Weekly => (reference - origin).num_weeks(),
            Recurrence::Monthly => month_index(reference) - month_index(origin),
            Recurrence::Yearly => i64::from(reference.year()) - i64::from(origin.year()),
        }
    }
}

fn step_months(origin: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        origin.checked_add_months(Months::new(magnitude))
    } else {
        origin.checked_sub_months(Months::new(magnitude))
    }
}

/// Months since year zero, ignoring the day.
fn month_index(at: NaiveDateTime) -> i64 {
    i64::from(at.year()) * 12 + i64::from(at.month0())
}
