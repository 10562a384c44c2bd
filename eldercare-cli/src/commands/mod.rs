pub mod config;
pub mod conflicts;
pub mod events;
