//! Care event types.
//!
//! These mirror the records served by the care backend. The detector only
//! looks at `id`, `elder_ids`, `start` and `end`; everything else is carried
//! along for display.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A scheduled care event (medication, appointment, activity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareEvent {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Elders this event applies to. Missing or null on the wire means none.
    #[serde(default, alias = "elder_ids", deserialize_with = "deserialize_id_list")]
    pub elder_ids: Vec<String>,

    pub start: DateTime<Utc>,
    /// Exclusive
    pub end: DateTime<Utc>,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub kind: EventKind,

    /// RRULE + EXDATEs for events that repeat (e.g. daily medication)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

fn default_title() -> String {
    "(No title)".to_string()
}

/// Recurrence rule for a repeating care event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    /// RRULE value without the `RRULE:` prefix, e.g. "FREQ=DAILY;COUNT=7"
    pub rrule: String,
    #[serde(default)]
    pub exdates: Vec<DateTime<Utc>>,
    /// IANA zone the rule repeats in. Daily 08:00 stays 08:00 local across
    /// DST changes; without it the rule repeats in UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tzid: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Medication,
    Appointment,
    Activity,
    #[default]
    #[serde(other)]
    Other,
}

impl EventKind {
    /// Map an ICS CATEGORIES value onto a kind. Unknown categories are `Other`.
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_ascii_lowercase().as_str() {
            "medication" | "medicine" => EventKind::Medication,
            "appointment" | "visit" => EventKind::Appointment,
            "activity" => EventKind::Activity,
            _ => EventKind::Other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Medication => "medication",
            EventKind::Appointment => "appointment",
            EventKind::Activity => "activity",
            EventKind::Other => "other",
        };
        write!(f, "{}", label)
    }
}

impl CareEvent {
    pub fn new(
        id: impl Into<String>,
        elder_ids: &[&str],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        title: impl Into<String>,
    ) -> Self {
        CareEvent {
            id: id.into(),
            elder_ids: elder_ids.iter().map(|s| s.to_string()).collect(),
            start,
            end,
            title: title.into(),
            kind: EventKind::Other,
            recurrence: None,
        }
    }

    /// Whether the half-open intervals `[start, end)` of both events intersect.
    pub fn overlaps(&self, other: &CareEvent) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn involves(&self, elder_id: &str) -> bool {
        self.elder_ids.iter().any(|id| id == elder_id)
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

impl fmt::Display for CareEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

// Backends hand out ids either as strings or as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<RawId>> = Option::deserialize(deserializer)?;
    Ok(ids
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}
