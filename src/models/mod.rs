// Module exports for models

pub mod event;
pub mod notification;
pub mod recurrence;
pub mod user;
