/// Number of days around "now" used when no window is given (past and future)
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Largest accepted `window_days` (about a century each way)
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Upper bound on instances produced for a single recurring event
pub const MAX_OCCURRENCES: u16 = 366;

/// Default length of a timed ICS event without DTEND
pub const DEFAULT_EVENT_MINUTES: i64 = 60;
