use chrono::{NaiveDate, NaiveDateTime};

use crate::models::event::Event;
use crate::utils::date::{end_of_day, start_of_day};

use super::locator::occurrence_start_before;
use super::predicate::occurrence_end;

/// Portion of an occurrence that falls inside a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EffectiveWindow {
    /// True when there is nothing to render on the day.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Clip the occurrence of `event` covering `day` to the day's bounds.
///
/// Pairs with [`occurs_on_day`]: on a day without an occurrence the window
/// comes back empty. A recurring occurrence that began on an earlier day
/// continues from midnight rather than re-showing its start time; its end
/// is capped at the day's exclusive end.
///
/// [`occurs_on_day`]: super::occurs_on_day
pub fn effective_times(event: &Event, day: NaiveDate) -> EffectiveWindow {
    let day_start = start_of_day(day);
    let day_end = end_of_day(day);

    if event.recurrence.is_none() {
        return EffectiveWindow {
            start: event.start.max(day_start),
            end: event.end.min(day_end),
        };
    }

    let Some(occurrence_start) = occurrence_start_before(event, day_end) else {
        return EffectiveWindow {
            start: day_start,
            end: day_start,
        };
    };

    let start = if occurrence_start.date() == day {
        occurrence_start.max(day_start)
    } else {
        day_start
    };
    EffectiveWindow {
        start,
        end: occurrence_end(occurrence_start, event).min(day_end),
    }
}

/// Template start time transplanted onto `day`: where a recurring event is
/// drawn inside that day's column.
pub fn occurrence_start_on_day(event: &Event, day: NaiveDate) -> NaiveDateTime {
    day.and_time(event.start.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recurrence::Recurrence;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_off(start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new("One-off", start, end).unwrap()
    }

    fn recurring(start: NaiveDateTime, end: NaiveDateTime, rule: Recurrence) -> Event {
        let mut event = Event::new("Recurring", start, end).unwrap();
        event.recurrence = Some(rule);
        event
    }

    #[test]
    fn test_single_event_within_day_is_unclipped() {
        let event = one_off(dt(2025, 3, 10, 13, 0), dt(2025, 3, 10, 14, 0));
        let window = effective_times(&event, date(2025, 3, 10));
        assert_eq!(window.start, dt(2025, 3, 10, 13, 0));
        assert_eq!(window.end, dt(2025, 3, 10, 14, 0));
        assert_eq!(window.duration(), Duration::hours(1));
    }

    #[test]
    fn test_overnight_event_clips_to_each_day() {
        let event = one_off(dt(2025, 3, 10, 22, 0), dt(2025, 3, 11, 6, 0));

        let first = effective_times(&event, date(2025, 3, 10));
        assert_eq!(first.start, dt(2025, 3, 10, 22, 0));
        assert_eq!(first.end, dt(2025, 3, 11, 0, 0));

        let second = effective_times(&event, date(2025, 3, 11));
        assert_eq!(second.start, dt(2025, 3, 11, 0, 0));
        assert_eq!(second.end, dt(2025, 3, 11, 6, 0));
    }

    #[test]
    fn test_multi_day_event_fills_interior_day() {
        let event = one_off(dt(2025, 3, 15, 7, 0), dt(2025, 3, 17, 22, 0));
        let middle = effective_times(&event, date(2025, 3, 16));
        assert_eq!(middle.start, dt(2025, 3, 16, 0, 0));
        assert_eq!(middle.end, dt(2025, 3, 17, 0, 0));
        assert_eq!(middle.duration(), Duration::hours(24));
    }

    #[test]
    fn test_single_event_on_foreign_day_is_empty() {
        let event = one_off(dt(2025, 3, 10, 9, 0), dt(2025, 3, 10, 10, 0));
        assert!(effective_times(&event, date(2025, 3, 12)).is_empty());
    }

    #[test]
    fn test_recurring_occurrence_same_day_keeps_times() {
        let event = recurring(dt(2025, 3, 10, 9, 0), dt(2025, 3, 10, 9, 15), Recurrence::Daily);
        let window = effective_times(&event, date(2025, 3, 14));
        assert_eq!(window.start, dt(2025, 3, 14, 9, 0));
        assert_eq!(window.end, dt(2025, 3, 14, 9, 15));
    }

    #[test]
    fn test_recurring_continuation_starts_at_midnight() {
        // Weekly Monday 22:00 to 02:00; Tuesday shows the tail
        let event = recurring(dt(2025, 3, 10, 22, 0), dt(2025, 3, 11, 2, 0), Recurrence::Weekly);
        let tail = effective_times(&event, date(2025, 3, 18));
        assert_eq!(tail.start, dt(2025, 3, 18, 0, 0));
        assert_eq!(tail.end, dt(2025, 3, 18, 2, 0));
    }

    #[test]
    fn test_recurring_head_clips_at_day_end() {
        let event = recurring(dt(2025, 3, 10, 22, 0), dt(2025, 3, 11, 2, 0), Recurrence::Weekly);
        let head = effective_times(&event, date(2025, 3, 17));
        assert_eq!(head.start, dt(2025, 3, 17, 22, 0));
        assert_eq!(head.end, dt(2025, 3, 18, 0, 0));
    }

    #[test]
    fn test_recurring_before_first_occurrence_is_empty_marker() {
        let event = recurring(dt(2025, 3, 10, 9, 0), dt(2025, 3, 10, 9, 30), Recurrence::Daily);
        let window = effective_times(&event, date(2025, 3, 8));
        assert_eq!(window.start, dt(2025, 3, 8, 0, 0));
        assert_eq!(window.end, dt(2025, 3, 8, 0, 0));
        assert!(window.is_empty());
    }

    #[test]
    fn test_recurring_off_day_yields_stale_empty_window() {
        // Weekly Tuesday event asked about a Thursday: the clip of last
        // Tuesday's occurrence is behind the day start and renders nothing
        let event = recurring(dt(2025, 3, 11, 10, 0), dt(2025, 3, 11, 10, 30), Recurrence::Weekly);
        let window = effective_times(&event, date(2025, 3, 13));
        assert!(window.is_empty());
    }

    #[test]
    fn test_monthly_clamped_occurrence_window() {
        let event = recurring(dt(2025, 1, 31, 14, 0), dt(2025, 1, 31, 15, 30), Recurrence::Monthly);
        let window = effective_times(&event, date(2025, 2, 28));
        assert_eq!(window.start, dt(2025, 2, 28, 14, 0));
        assert_eq!(window.end, dt(2025, 2, 28, 15, 30));
    }

    #[test]
    fn test_occurrence_start_on_day_transplants_time() {
        let event = recurring(dt(2025, 3, 11, 10, 0), dt(2025, 3, 11, 10, 30), Recurrence::Weekly);
        assert_eq!(
            occurrence_start_on_day(&event, date(2025, 3, 18)),
            dt(2025, 3, 18, 10, 0)
        );
    }
}
