//! Date window for filtering care events.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::constants::DEFAULT_WINDOW_DAYS;
use crate::error::{CareError, CareResult};

/// Date range for filtering events.
/// None values mean unbounded in that direction. `to` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl Default for DateRange {
    /// Default range: ±DEFAULT_WINDOW_DAYS from now
    fn default() -> Self {
        Self::around_now(DEFAULT_WINDOW_DAYS).unwrap_or_else(|_| Self::unbounded())
    }
}

impl DateRange {
    pub fn unbounded() -> Self {
        DateRange {
            from: None,
            to: None,
        }
    }

    /// ±`days` from now
    pub fn around_now(days: i64) -> CareResult<Self> {
        let (from, to) = window_edges(Utc::now(), days)?;
        Ok(DateRange {
            from: Some(from),
            to: Some(to),
        })
    }

    /// Parse command-line bounds into a DateRange.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD (start of that day)
    /// - `to`: "end" for unbounded, or YYYY-MM-DD (the whole day is included)
    /// - Missing bounds default to ±`window_days` from now
    pub fn from_args(from: Option<&str>, to: Option<&str>, window_days: i64) -> CareResult<Self> {
        let now = Utc::now();

        let from_dt = match from {
            Some("start") => None,
            Some(s) => Some(start_of_day(parse_date(s)?)),
            None => Some(window_edges(now, window_days)?.0),
        };

        let to_dt = match to {
            Some("end") => None,
            Some(s) => {
                let date = parse_date(s)?;
                let next = date.checked_add_days(Days::new(1)).ok_or_else(|| {
                    CareError::InvalidRange(format!("Date '{}' is out of range", s))
                })?;
                Some(start_of_day(next))
            }
            None => Some(window_edges(now, window_days)?.1),
        };

        if let (Some(f), Some(t)) = (from_dt, to_dt) {
            if f >= t {
                return Err(CareError::InvalidRange(format!(
                    "'from' ({}) must be before 'to' ({})",
                    f.format("%Y-%m-%d"),
                    t.format("%Y-%m-%d")
                )));
            }
        }

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// Whether the half-open interval `[start, end)` touches the window.
    /// Zero-length events count when they sit inside it.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let after_from = match self.from {
            Some(from) => end > from || (start == end && start >= from),
            None => true,
        };
        let before_to = match self.to {
            Some(to) => start < to,
            None => true,
        };
        after_from && before_to
    }

    /// Bounds for expanding recurrences; unbounded sides are clamped to
    /// DEFAULT_WINDOW_DAYS around now so expansion always terminates.
    pub fn clamped(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let fallback = Self::default();
        let from = self.from.or(fallback.from).unwrap_or_else(Utc::now);
        let to = self.to.or(fallback.to).unwrap_or_else(Utc::now);
        (from, to)
    }
}

/// `now` ± `days`, or InvalidRange when either edge leaves chrono's range.
fn window_edges(now: DateTime<Utc>, days: i64) -> CareResult<(DateTime<Utc>, DateTime<Utc>)> {
    let out_of_range =
        || CareError::InvalidRange(format!("A window of {} days is out of range", days));
    let delta = TimeDelta::try_days(days).ok_or_else(out_of_range)?;
    let from = now.checked_sub_signed(delta).ok_or_else(out_of_range)?;
    let to = now.checked_add_signed(delta).ok_or_else(out_of_range)?;
    Ok((from, to))
}

fn parse_date(s: &str) -> CareResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        CareError::InvalidRange(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
