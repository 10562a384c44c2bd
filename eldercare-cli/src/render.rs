//! TUI rendering traits for eldercare types.
//!
//! Extension traits that add colored terminal rendering to eldercare-core
//! types using owo_colors.

use chrono::{DateTime, Local, Utc};
use eldercare_core::{CareEvent, ConflictRecord, EventKind};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventKind {
    fn render(&self) -> String {
        let tag = format!("[{}]", self);
        match self {
            EventKind::Medication => tag.magenta().to_string(),
            EventKind::Appointment => tag.cyan().to_string(),
            EventKind::Activity => tag.green().to_string(),
            EventKind::Other => tag.dimmed().to_string(),
        }
    }
}

impl Render for CareEvent {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            format_span(self.start, self.end).dimmed(),
            self.title,
            self.kind.render()
        )
    }
}

impl Render for ConflictRecord<'_> {
    fn render(&self) -> String {
        let overlap = format_overlap(self);
        format!(
            "   {} {}\n   {} {}  {}",
            "!".red(),
            self.first().render(),
            "!".red(),
            self.second().render(),
            overlap.yellow()
        )
    }
}

/// Start–end in local time; the date is repeated only when the span crosses midnight.
pub fn format_span(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let start = start.with_timezone(&Local);
    let end = end.with_timezone(&Local);

    if start.date_naive() == end.date_naive() {
        format!("{}–{}", start.format("%a %b %-d %H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} – {}",
            start.format("%a %b %-d %H:%M"),
            end.format("%a %b %-d %H:%M")
        )
    }
}

/// e.g. "overlap 30m" or "overlap 1h 15m"
pub fn format_overlap(conflict: &ConflictRecord) -> String {
    let overlap = conflict.overlap().to_std().unwrap_or_default();
    format!("overlap {}", humantime::format_duration(overlap))
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_overlap() {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap();
        let a = CareEvent::new("a", &["e1"], start, start + Duration::minutes(90), "Physio");
        let b = CareEvent::new(
            "b",
            &["e1"],
            start + Duration::minutes(15),
            start + Duration::hours(3),
            "Lunch",
        );
        let events = vec![a, b];
        let conflicts = eldercare_core::detect_conflicts(&events, &[]);

        assert_eq!(format_overlap(&conflicts[0]), "overlap 1h 15m");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("conflict", 1), "conflict");
        assert_eq!(pluralize("conflict", 3), "conflicts");
    }
}
