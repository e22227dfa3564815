//! Calendar service entry point.
//! Shapes store-backed events into per-view structures: visible event
//! sets, day lists, and clipped blocks for the grid to draw.

pub mod grid;
pub mod view;

pub use grid::{
    day_events, days_for, month_days, month_leading_blanks, week_days, work_week_days, EventBlock,
};
pub use view::ViewKind;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::event::Event;
use crate::store::{EventStore, Session};

/// Service answering calendar queries over a document store.
pub struct CalendarService<'a, S: EventStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: EventStore + ?Sized> CalendarService<'a, S> {
    /// Create a new CalendarService over a store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Events the viewer can see, ordered by start time then id.
    ///
    /// Signed-out viewers get public events only; signed-in viewers also
    /// see what they created or joined.
    pub fn visible_events(&self, viewer: Option<&Session>) -> Result<Vec<Event>> {
        let uid = viewer.map(Session::uid);
        let mut events = self.store.events()?;
        events.retain(|event| event.is_visible_to(uid));
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// Clipped blocks for one grid day, in draw order.
    pub fn day_blocks(&self, viewer: Option<&Session>, day: NaiveDate) -> Result<Vec<EventBlock>> {
        Ok(day_events(&self.visible_events(viewer)?, day))
    }

    /// Occurrence counts for each date a view lays out, in day order.
    pub fn occurrence_counts(
        &self,
        viewer: Option<&Session>,
        kind: ViewKind,
        date: NaiveDate,
    ) -> Result<Vec<(NaiveDate, usize)>> {
        let events = self.visible_events(viewer)?;
        Ok(days_for(kind, date)
            .into_iter()
            .map(|day| {
                let count = events
                    .iter()
                    .filter(|event| crate::services::occurrence::occurs_on_day(event, day))
                    .count();
                (day, count)
            })
            .collect())
    }
}
