//! ICS parsing using the icalendar crate's parser.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, Property, read_calendar, unfold},
};

use crate::constants::DEFAULT_EVENT_MINUTES;
use crate::error::{CareError, CareResult};
use crate::event::{CareEvent, EventKind, Recurrence};

const ELDER_IDS_PROPERTY: &str = "X-ELDER-IDS";

/// Parse every VEVENT in ICS content into care events.
///
/// VEVENTs without UID or DTSTART, or with an unresolvable time, are skipped
/// with a warning. Cancelled events are dropped.
pub fn parse_events(content: &str) -> CareResult<Vec<CareEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CareError::IcsParse(e.to_string()))?;

    let events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter(|c| !is_cancelled(c))
        .filter_map(|vevent| {
            let parsed = parse_vevent(vevent);
            if parsed.is_none() {
                let uid = vevent.find_prop("UID").map(|p| p.val.to_string());
                log::warn!(
                    "Skipping VEVENT {} with missing or invalid UID/DTSTART/DTEND",
                    uid.as_deref().unwrap_or("(no UID)")
                );
            }
            parsed
        })
        .collect();

    Ok(events)
}

fn is_cancelled(vevent: &Component) -> bool {
    vevent
        .find_prop("STATUS")
        .is_some_and(|p| p.val.as_ref() == "CANCELLED")
}

fn parse_vevent(vevent: &Component) -> Option<CareEvent> {
    let id = vevent.find_prop("UID")?.val.to_string();
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    let start_dpt = DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?;
    let all_day = matches!(start_dpt, DatePerhapsTime::Date(_));
    let start_tzid = match &start_dpt {
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { tzid, .. })
            if tzid.parse::<Tz>().is_ok() =>
        {
            Some(tzid.clone())
        }
        _ => None,
    };
    let start = to_utc(start_dpt)?;

    let end = match vevent.find_prop("DTEND") {
        Some(prop) => to_utc(DatePerhapsTime::try_from(prop).ok()?)?,
        None if all_day => start + Duration::days(1),
        None => start + Duration::minutes(DEFAULT_EVENT_MINUTES),
    };

    let elder_ids = vevent
        .find_prop(ELDER_IDS_PROPERTY)
        .map(|p| {
            p.val
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let kind = vevent
        .find_prop("CATEGORIES")
        .and_then(|p| p.val.as_ref().split(',').next().map(EventKind::from_category))
        .unwrap_or_default();

    let recurrence = vevent.find_prop("RRULE").map(|p| Recurrence {
        rrule: p.val.to_string(),
        exdates: vevent
            .properties
            .iter()
            .filter(|p| p.name == "EXDATE")
            .flat_map(parse_exdate_property)
            .collect(),
        tzid: start_tzid,
    });

    Some(CareEvent {
        id,
        elder_ids,
        start,
        end,
        title,
        kind,
        recurrence,
    })
}

/// Resolve icalendar's DatePerhapsTime to UTC.
/// All-day dates start at midnight UTC and floating times are read as UTC.
fn to_utc(dpt: DatePerhapsTime) -> Option<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::Date(d) => Some(d.and_time(NaiveTime::MIN).and_utc()),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => Some(dt),
            CalendarDateTime::Floating(naive) => Some(naive.and_utc()),
            CalendarDateTime::WithTimezone { date_time, tzid } => zoned_to_utc(date_time, &tzid),
        },
    }
}

fn zoned_to_utc(local: NaiveDateTime, tzid: &str) -> Option<DateTime<Utc>> {
    let tz: Tz = match tzid.parse() {
        Ok(tz) => tz,
        Err(_) => {
            log::warn!("Unknown TZID '{}', reading time as UTC", tzid);
            return Some(local.and_utc());
        }
    };

    // Times inside a DST gap don't exist; `earliest` picks the first of an ambiguous pair
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an EXDATE property into UTC instants.
///
/// Handles:
/// - TZID parameter: `EXDATE;TZID=Europe/London:20240108T100000`
/// - VALUE=DATE: `EXDATE;VALUE=DATE:20240108`
/// - UTC: `EXDATE:20240108T100000Z`
/// - Comma-separated values
fn parse_exdate_property(prop: &Property) -> Vec<DateTime<Utc>> {
    let tzid = prop
        .params
        .iter()
        .find(|p| p.key == "TZID")
        .and_then(|p| p.val.as_ref().map(|v| v.to_string()));

    let is_date = prop
        .params
        .iter()
        .any(|p| p.key == "VALUE" && p.val.as_ref().map(|v| v.as_ref()) == Some("DATE"));

    prop.val
        .as_ref()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            if is_date {
                chrono::NaiveDate::parse_from_str(s, "%Y%m%d")
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            } else {
                let naive =
                    NaiveDateTime::parse_from_str(s.trim_end_matches('Z'), "%Y%m%dT%H%M%S").ok()?;
                match (&tzid, s.ends_with('Z')) {
                    (Some(tz), false) => zoned_to_utc(naive, tz),
                    _ => Some(naive.and_utc()),
                }
            }
        })
        .collect()
}
