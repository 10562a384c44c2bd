//! Schedule snapshots loaded from disk.
//!
//! A snapshot is whatever the care backend last exported: either a JSON
//! document `{ "elders": [...], "events": [...] }`, a single `.ics` file, or a
//! directory of `.ics` files with an optional `elders.json` roster next to
//! them. Loading is best-effort per event: one bad record never hides the rest.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::date_range::DateRange;
use crate::elder::Elder;
use crate::error::{CareError, CareResult};
use crate::event::CareEvent;
use crate::ics::parse_events;
use crate::recurrence::expand_recurring_event;

const ROSTER_FILE: &str = "elders.json";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub elders: Vec<Elder>,
    pub events: Vec<CareEvent>,
}

#[derive(Deserialize)]
struct RawSchedule {
    #[serde(default)]
    elders: Vec<Elder>,
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

impl Schedule {
    pub fn new(elders: Vec<Elder>, events: Vec<CareEvent>) -> Self {
        Schedule { elders, events }
    }

    /// Parse a JSON snapshot. Events that don't deserialize are skipped.
    pub fn from_json_str(content: &str) -> CareResult<Self> {
        let raw: RawSchedule =
            serde_json::from_str(content).map_err(|e| CareError::Parse(e.to_string()))?;

        let events = raw
            .events
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value::<CareEvent>(value) {
                Ok(event) => Some(event),
                Err(e) => {
                    log::warn!("Skipping event #{} in schedule: {}", i, e);
                    None
                }
            })
            .collect();

        Ok(Schedule {
            elders: raw.elders,
            events,
        })
    }

    /// Load a snapshot from a JSON file, an `.ics` file or a directory of
    /// `.ics` files. `~` is expanded.
    pub fn load(path: &Path) -> CareResult<Self> {
        let path = expand_path(path);

        if !path.exists() {
            return Err(CareError::ScheduleNotFound(path.display().to_string()));
        }

        let schedule = if path.is_dir() {
            Self::load_dir(&path)?
        } else if is_ics(&path) {
            let content = std::fs::read_to_string(&path)?;
            Schedule::new(Vec::new(), parse_events(&content)?)
        } else {
            Self::from_json_str(&std::fs::read_to_string(&path)?)?
        };

        log::debug!(
            "Loaded {} elders and {} events from {}",
            schedule.elders.len(),
            schedule.events.len(),
            path.display()
        );

        Ok(schedule)
    }

    fn load_dir(dir: &Path) -> CareResult<Self> {
        let mut ics_files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_ics(path))
            .collect();
        ics_files.sort();

        let mut events = Vec::new();
        for file in &ics_files {
            let content = std::fs::read_to_string(file)?;
            match parse_events(&content) {
                Ok(parsed) => events.extend(parsed),
                Err(e) => log::warn!("Skipping {}: {}", file.display(), e),
            }
        }

        let roster_path = dir.join(ROSTER_FILE);
        let elders = if roster_path.exists() {
            let content = std::fs::read_to_string(&roster_path)?;
            serde_json::from_str(&content).map_err(|e| {
                CareError::Parse(format!("{}: {}", roster_path.display(), e))
            })?
        } else {
            Vec::new()
        };

        Ok(Schedule { elders, events })
    }

    pub fn elder(&self, id: &str) -> Option<&Elder> {
        self.elders.iter().find(|e| e.id == id)
    }

    /// Concrete events overlapping `range`, recurring events expanded, in
    /// snapshot order. A recurring event whose rule can't be expanded is
    /// skipped with a warning.
    pub fn events_in_range(&self, range: &DateRange) -> Vec<CareEvent> {
        let mut events = Vec::with_capacity(self.events.len());

        for event in &self.events {
            if event.is_recurring() {
                match expand_recurring_event(event, range) {
                    Ok(instances) => events.extend(instances),
                    Err(e) => log::warn!("{}", e),
                }
            } else if range.overlaps(event.start, event.end) {
                events.push(event.clone());
            }
        }

        events
    }
}

fn is_ics(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("ics"))
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::{ScanStrategy, detect_conflicts_with};

    const SNAPSHOT: &str = r#"{
        "elders": [
            {"id": "e1", "name": "Margaret"},
            {"id": 2, "name": "Harold"}
        ],
        "events": [
            {"id": "a", "elderIds": ["e1"], "start": "2025-03-20T09:00:00Z", "end": "2025-03-20T10:00:00Z", "title": "Physio"},
            {"id": "broken", "elderIds": ["e1"], "start": "not a date", "end": "2025-03-20T10:00:00Z"},
            {"id": "b", "elderIds": ["e1", "2"], "start": "2025-03-20T09:30:00Z", "end": "2025-03-20T10:30:00Z", "title": "Lunch"},
            {"id": "pills", "elderIds": ["2"], "start": "2025-03-18T10:00:00Z", "end": "2025-03-18T10:15:00Z",
             "title": "Pills", "kind": "medication", "recurrence": {"rrule": "FREQ=DAILY"}}
        ]
    }"#;

    #[test]
    fn test_from_json_skips_malformed_events() {
        let schedule = Schedule::from_json_str(SNAPSHOT).expect("Should parse");

        let ids: Vec<&str> = schedule.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "pills"]);
        assert_eq!(schedule.elder("2").map(|e| e.name.as_str()), Some("Harold"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            Schedule::from_json_str("[1, 2, 3]"),
            Err(CareError::Parse(_))
        ));
    }

    #[test]
    fn test_events_in_range_expands_recurrence() {
        let schedule = Schedule::from_json_str(SNAPSHOT).unwrap();
        let range = DateRange::from_args(Some("2025-03-20"), Some("2025-03-20"), 30).unwrap();

        let events = schedule.events_in_range(&range);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "pills@20250320T100000Z"]);
    }

    #[test]
    fn test_expanded_instances_conflict() {
        let schedule = Schedule::from_json_str(SNAPSHOT).unwrap();
        let range = DateRange::from_args(Some("2025-03-20"), Some("2025-03-20"), 30).unwrap();
        let events = schedule.events_in_range(&range);

        let conflicts = detect_conflicts_with(&events, &schedule.elders, ScanStrategy::Sweep);

        let found: Vec<(&str, &str, &str)> = conflicts
            .iter()
            .map(|c| (c.elder_id, c.first().id.as_str(), c.second().id.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![("e1", "a", "b"), ("2", "b", "pills@20250320T100000Z")]
        );
    }

    #[test]
    fn test_zoned_recurrence_conflicts_after_dst_change() {
        let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TEST\r\n\
BEGIN:VEVENT\r\nUID:pills\r\nSUMMARY:Pills\r\n\
DTSTART;TZID=Europe/Berlin:20250301T080000\r\nDTEND;TZID=Europe/Berlin:20250301T081500\r\n\
RRULE:FREQ=DAILY\r\nX-ELDER-IDS:e1\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nUID:appt\r\nSUMMARY:Cardiologist\r\n\
DTSTART;TZID=Europe/Berlin:20250402T080000\r\nDTEND;TZID=Europe/Berlin:20250402T090000\r\n\
X-ELDER-IDS:e1\r\nEND:VEVENT\r\n\
END:VCALENDAR\r\n";
        let schedule = Schedule::new(Vec::new(), parse_events(ics).unwrap());
        let range = DateRange::from_args(Some("2025-04-02"), Some("2025-04-02"), 30).unwrap();
        let events = schedule.events_in_range(&range);

        let conflicts = detect_conflicts_with(&events, &schedule.elders, ScanStrategy::Adjacent);

        let found: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.first().id.as_str(), c.second().id.as_str()))
            .collect();
        assert_eq!(found, vec![("appt", "pills@20250402T060000Z")]);
    }

    #[test]
    fn test_load_directory_of_ics_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("visits.ics"),
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TEST\r\n\
BEGIN:VEVENT\r\nUID:v1\r\nSUMMARY:Nurse visit\r\nDTSTART:20250320T090000Z\r\nDTEND:20250320T100000Z\r\nX-ELDER-IDS:e1\r\nEND:VEVENT\r\n\
END:VCALENDAR\r\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(
            dir.path().join(ROSTER_FILE),
            r#"[{"id": "e1", "name": "Margaret"}]"#,
        )
        .unwrap();

        let schedule = Schedule::load(dir.path()).expect("Should load");

        assert_eq!(schedule.events.len(), 1);
        assert_eq!(schedule.events[0].title, "Nurse visit");
        assert_eq!(schedule.elders, vec![Elder::new("e1", "Margaret")]);
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        assert!(matches!(
            Schedule::load(&missing),
            Err(CareError::ScheduleNotFound(_))
        ));
    }
}
