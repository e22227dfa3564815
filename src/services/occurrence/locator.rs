use chrono::NaiveDateTime;

use crate::models::event::Event;

/// Start of the latest occurrence of `event` that begins strictly before
/// `reference`, or `None` when the event is non-recurring or has no
/// occurrence before that instant.
///
/// `reference` is an exclusive bound: day queries pass the day's exclusive
/// end (the following midnight), which selects the same occurrence as the
/// last representable instant of the day would, midnight starts included.
///
/// Computed by estimating the elapsed period count, stepping the template
/// start forward by that many periods, and stepping back once if the
/// candidate reached `reference`. The raw estimate is never short and
/// overshoots by at most one period, so a single correction suffices.
pub fn occurrence_start_before(event: &Event, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    let rule = event.recurrence?;
    if reference <= event.start {
        return None;
    }

    let mut periods = rule.elapsed_periods(event.start, reference);
    let mut candidate = rule.step(event.start, periods)?;
    if candidate >= reference {
        periods -= 1;
        candidate = rule.step(event.start, periods)?;
    }
    Some(candidate)
}
