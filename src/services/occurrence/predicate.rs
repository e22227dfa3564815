use chrono::{NaiveDate, NaiveDateTime};

use crate::models::event::Event;
use crate::utils::date::{end_of_day, start_of_day};

use super::locator::occurrence_start_before;

/// Whether `event` has an occurrence overlapping `day`.
///
/// Overlap uses the half-open day window `[midnight, next midnight)`, so an
/// occurrence that merely touches midnight does not bleed into the
/// neighboring day, while a multi-day occurrence shows on every day it
/// crosses.
pub fn occurs_on_day(event: &Event, day: NaiveDate) -> bool {
    let day_start = start_of_day(day);
    let day_end = end_of_day(day);

    if event.recurrence.is_none() {
        return event.end > day_start && event.start < day_end;
    }

    let Some(occurrence_start) = occurrence_start_before(event, day_end) else {
        return false;
    };
    let occurrence_end = occurrence_end(occurrence_start, event);
    occurrence_end > day_start && occurrence_start < day_end
}

/// End of an occurrence: the start shifted by the template duration,
/// saturating at the calendar's end.
pub(super) fn occurrence_end(occurrence_start: NaiveDateTime, event: &Event) -> NaiveDateTime {
    occurrence_start
        .checked_add_signed(event.duration())
        .unwrap_or(NaiveDateTime::MAX)
}
