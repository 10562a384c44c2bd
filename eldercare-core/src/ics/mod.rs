//! ICS import.
//!
//! Care events exported from a calendar carry their elders in the
//! `X-ELDER-IDS` property (comma separated) and their kind in `CATEGORIES`.

mod parse;

pub use parse::parse_events;
