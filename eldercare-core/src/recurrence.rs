//! RRULE expansion for repeating care events.
//!
//! Expands a recurring event into concrete instances within a date range,
//! respecting EXDATEs, so the conflict detector only ever sees plain intervals.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::constants::MAX_OCCURRENCES;
use crate::date_range::DateRange;
use crate::error::{CareError, CareResult};
use crate::event::{CareEvent, Recurrence};

/// Format an instant as an ICS property, in the rule's zone when it has one
/// so that occurrences keep their wall-clock time across DST changes.
fn ics_time_line(name: &str, instant: DateTime<Utc>, zone: Option<(&str, Tz)>) -> String {
    match zone {
        Some((tzid, tz)) => format!(
            "{};TZID={}:{}",
            name,
            tzid,
            instant.with_timezone(&tz).format("%Y%m%dT%H%M%S")
        ),
        None => format!("{}:{}", name, instant.format("%Y%m%dT%H%M%SZ")),
    }
}

/// Build an iCalendar-format RRULE string for the rrule crate parser.
fn build_rrule_string(start: DateTime<Utc>, recurrence: &Recurrence) -> CareResult<String> {
    let zone = match recurrence.tzid.as_deref() {
        Some(tzid) => {
            let tz: Tz = tzid
                .parse()
                .map_err(|_| CareError::Recurrence(format!("Unknown TZID '{}'", tzid)))?;
            Some((tzid, tz))
        }
        None => None,
    };

    let mut lines = vec![
        ics_time_line("DTSTART", start, zone),
        format!("RRULE:{}", recurrence.rrule),
    ];

    lines.extend(
        recurrence
            .exdates
            .iter()
            .map(|exdate| ics_time_line("EXDATE", *exdate, zone)),
    );

    Ok(lines.join("\n"))
}

/// Id of a single occurrence: `<master id>@<UTC start>`
pub fn instance_id(master_id: &str, start: DateTime<Utc>) -> String {
    format!("{}@{}", master_id, start.format("%Y%m%dT%H%M%SZ"))
}

/// Expand a recurring event into the instances that overlap `range`.
///
/// Non-recurring events come back unchanged as a single-element list.
/// Instances keep the master's duration, elders, title and kind, and carry no
/// recurrence of their own. At most MAX_OCCURRENCES instances are produced.
pub fn expand_recurring_event(event: &CareEvent, range: &DateRange) -> CareResult<Vec<CareEvent>> {
    let recurrence = match &event.recurrence {
        Some(r) => r,
        None => return Ok(vec![event.clone()]),
    };

    let rrule_set: RRuleSet = build_rrule_string(event.start, recurrence)?
        .parse()
        .map_err(|e| {
            CareError::Recurrence(format!(
                "Failed to parse RRULE for event '{}': {}",
                event.id, e
            ))
        })?;

    let duration = event.duration().max(Duration::zero());
    let (range_start, range_end) = range.clamped();

    // Occurrences that started before the window but are still running count too.
    // Subtract 1 second to make `after` inclusive.
    let tz: rrule::Tz = Utc.into();
    let after = (range_start - duration - Duration::seconds(1)).with_timezone(&tz);
    let before = range_end.with_timezone(&tz);

    let result = rrule_set.after(after).before(before).all(MAX_OCCURRENCES);
    if result.limited {
        log::warn!(
            "Recurring event '{}' has more than {} occurrences in range; truncated",
            event.id,
            MAX_OCCURRENCES
        );
    }

    let instances = result
        .dates
        .iter()
        .map(|occ| {
            let start = occ.with_timezone(&Utc);
            CareEvent {
                id: instance_id(&event.id, start),
                elder_ids: event.elder_ids.clone(),
                start,
                end: start + duration,
                title: event.title.clone(),
                kind: event.kind,
                recurrence: None,
            }
        })
        .filter(|instance| range.overlaps(instance.start, instance.end))
        .collect();

    Ok(instances)
}
