// calgrid
// Event-calendar core: typed schemas, the recurring-event occurrence
// engine, and grid shaping over a document-store boundary

pub mod models;
pub mod services;
pub mod store;
pub mod utils;
