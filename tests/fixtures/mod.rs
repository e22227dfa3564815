// Test fixtures - reusable test data
// Provides consistent sample users and a March 2025 schedule across test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use calgrid::models::event::Event;
use calgrid::models::recurrence::Recurrence;
use calgrid::models::user::User;

/// Builds a date without time, panicking on invalid input.
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds a timestamp down to the minute, panicking on invalid input.
pub fn dt(year: i32, month: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(year, month, d).and_hms_opt(hour, minute, 0).unwrap()
}

/// A profile with enough fields filled in for display-name assertions.
pub fn named_user(uid: &str, username: &str, first_name: &str, last_name: &str) -> User {
    let mut user = User::new(uid, username, format!("{username}@example.com"));
    user.first_name = first_name.to_string();
    user.last_name = last_name.to_string();
    user.phone_number = "0890000000".to_string();
    user
}

fn sample(id: &str, title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event::builder()
        .id(id)
        .creator_id("uid-alice")
        .title(title)
        .start(start)
        .end(end)
        .build()
        .unwrap()
}

/// One busy March 2025 week: a packed Monday, an overnight event, a
/// multi-day trip, and one event per recurrence rule.
///
/// Ids are assigned in list order so ordering assertions stay stable.
pub fn sample_events() -> Vec<Event> {
    let mut events = vec![
        sample("ev-01", "Morning Standup", dt(2025, 3, 10, 9, 0), dt(2025, 3, 10, 9, 30)),
        sample("ev-02", "Project Meeting", dt(2025, 3, 10, 10, 30), dt(2025, 3, 10, 12, 0)),
        sample("ev-03", "Lunch Break", dt(2025, 3, 10, 13, 0), dt(2025, 3, 10, 14, 0)),
        sample("ev-04", "Client Presentation", dt(2025, 3, 10, 15, 0), dt(2025, 3, 10, 16, 30)),
        sample("ev-05", "Gym Workout", dt(2025, 3, 10, 18, 0), dt(2025, 3, 10, 19, 30)),
        sample("ev-06", "Dinner with Family", dt(2025, 3, 10, 20, 0), dt(2025, 3, 10, 21, 30)),
        sample("ev-07", "Overnight Hackathon", dt(2025, 3, 10, 22, 0), dt(2025, 3, 11, 6, 0)),
        sample("ev-08", "Weekend Trip", dt(2025, 3, 15, 7, 0), dt(2025, 3, 17, 22, 0)),
        sample("ev-09", "Daily Standup", dt(2025, 3, 10, 9, 0), dt(2025, 3, 10, 9, 15)),
        sample("ev-10", "Weekly Sync", dt(2025, 3, 11, 10, 0), dt(2025, 3, 11, 10, 30)),
        sample("ev-11", "Monthly Check", dt(2025, 3, 15, 14, 0), dt(2025, 3, 15, 15, 0)),
    ];
    events[8].recurrence = Some(Recurrence::Daily);
    events[9].recurrence = Some(Recurrence::Weekly);
    events[10].recurrence = Some(Recurrence::Monthly);
    events
}

/// Single event from [`sample_events`] by title.
pub fn sample_event(title: &str) -> Event {
    sample_events()
        .into_iter()
        .find(|event| event.title == title)
        .unwrap_or_else(|| panic!("no sample event titled {title:?}"))
}
