//! Recurring-event occurrence engine.
//!
//! Pure date arithmetic shared by every calendar view: whether an event
//! (possibly recurring) lands on a day, where the covering occurrence
//! starts, and how its span clips to the day's bounds. Works on plain
//! wall-clock times and never enumerates occurrences; each answer is a
//! constant number of calendar steps, so a far-future day costs the same
//! as tomorrow.

mod locator;
mod predicate;
mod rules;
mod window;

pub use locator::occurrence_start_before;
pub use predicate::occurs_on_day;
pub use window::{effective_times, occurrence_start_on_day, EffectiveWindow};
