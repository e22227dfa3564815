// Service module exports

pub mod calendar;
pub mod occurrence;
pub mod validation;
