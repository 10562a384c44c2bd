//! Core types for eldercare.
//!
//! This crate provides what both the CLI and any other front-end need:
//! - `CareEvent` and `Elder`, as served by the care backend
//! - `conflict` for finding overlapping events per elder
//! - `Schedule` for loading snapshots (JSON or ICS) and expanding recurrences

pub mod config;
pub mod conflict;
pub mod constants;
pub mod date_range;
pub mod elder;
pub mod error;
pub mod event;
pub mod ics;
pub mod recurrence;
pub mod schedule;

pub use conflict::{ConflictRecord, ScanStrategy, detect_conflicts, detect_conflicts_with};
pub use elder::Elder;
pub use error::{CareError, CareResult};
pub use event::{CareEvent, EventKind, Recurrence};
pub use schedule::Schedule;
