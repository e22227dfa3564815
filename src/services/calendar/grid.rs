// Grid shaping
// Day lists and per-day event blocks backing the calendar views

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::models::event::Event;
use crate::services::occurrence::{occurrence_start_on_day, occurs_on_day};
use crate::utils::date::{
    days_in_month, end_of_day, is_same_day, start_of_day, week_start, weekday_from_sunday,
};

use super::view::ViewKind;

/// Dates of the month containing `day`, in order.
pub fn month_days(day: NaiveDate) -> Vec<NaiveDate> {
    let count = days_in_month(day.year(), day.month());
    (1..=count)
        .filter_map(|d| NaiveDate::from_ymd_opt(day.year(), day.month(), d))
        .collect()
}

/// Empty cells before the 1st in a Sunday-first month grid.
pub fn month_leading_blanks(day: NaiveDate) -> u32 {
    match NaiveDate::from_ymd_opt(day.year(), day.month(), 1) {
        Some(first) => weekday_from_sunday(first),
        None => 0,
    }
}

/// Monday through Sunday of the week containing `day`.
pub fn week_days(day: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(day);
    (0..7)
        .filter_map(|offset| monday.checked_add_signed(chrono::Duration::days(offset)))
        .collect()
}

/// Monday through Friday of the week containing `day`.
pub fn work_week_days(day: NaiveDate) -> Vec<NaiveDate> {
    let mut days = week_days(day);
    days.truncate(5);
    days
}

/// The dates a view lays out around `date`.
pub fn days_for(kind: ViewKind, date: NaiveDate) -> Vec<NaiveDate> {
    match kind {
        ViewKind::Month => month_days(date),
        ViewKind::Week => week_days(date),
        ViewKind::WorkWeek => work_week_days(date),
        ViewKind::Day => vec![date],
    }
}

/// An event clipped for drawing inside one day's cell or column.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// True when the underlying event spans more than one day.
    pub continued: bool,
}

impl EventBlock {
    /// Minutes past midnight where the block begins, for column placement.
    pub fn minutes_from_midnight(&self) -> i64 {
        i64::from(self.start.hour()) * 60 + i64::from(self.start.minute())
    }

    /// Block height in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Blocks for every event with an occurrence on `day`, clipped to the day
/// and ordered by start time, ties broken by event id.
///
/// Recurring events are drawn at their template time-of-day transplanted
/// onto `day`; one-off events keep their actual times. Either way the block
/// is capped at the day's bounds.
pub fn day_events(events: &[Event], day: NaiveDate) -> Vec<EventBlock> {
    let day_start = start_of_day(day);
    let day_end = end_of_day(day);

    let mut blocks: Vec<EventBlock> = events
        .iter()
        .filter(|event| occurs_on_day(event, day))
        .map(|event| {
            let occurrence_start = if event.is_recurring() {
                occurrence_start_on_day(event, day)
            } else {
                event.start
            };
            let occurrence_end = occurrence_start
                .checked_add_signed(event.duration())
                .unwrap_or(NaiveDateTime::MAX);
            EventBlock {
                event_id: event.id.clone(),
                title: event.title.clone(),
                start: occurrence_start.max(day_start),
                end: occurrence_end.min(day_end),
                continued: !is_same_day(event.start, event.end),
            }
        })
        .collect();

    blocks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.event_id.cmp(&b.event_id)));
    blocks
}
