use chrono::{DateTime, Utc};

use crate::event::CareEvent;

type Pair<'a> = (&'a CareEvent, &'a CareEvent);

/// Report each event that starts before its predecessor ends.
pub(super) fn adjacent<'a>(sorted: &[&'a CareEvent]) -> Vec<Pair<'a>> {
    sorted
        .windows(2)
        .filter(|w| w[1].start < w[0].end)
        .map(|w| (w[0], w[1]))
        .collect()
}

/// Report every overlapping pair.
///
/// `open` holds the events that may still overlap something later: anything
/// ending at or before the current start is dropped, since every later event
/// starts no earlier.
pub(super) fn sweep<'a>(sorted: &[&'a CareEvent]) -> Vec<Pair<'a>> {
    let mut pairs = Vec::new();
    let mut open: Vec<&'a CareEvent> = Vec::new();
    let mut max_end: Option<DateTime<Utc>> = None;

    for &current in sorted {
        if max_end.is_some_and(|end| current.start >= end) {
            open.clear();
        } else {
            open.retain(|e| e.end > current.start);
        }

        pairs.extend(
            open.iter()
                .filter(|earlier| earlier.overlaps(current))
                .map(|&earlier| (earlier, current)),
        );

        max_end = Some(max_end.map_or(current.end, |end| end.max(current.end)));
        open.push(current);
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ev(id: &str, start: u32, end: u32) -> CareEvent {
        CareEvent::new(
            id,
            &["e1"],
            Utc.with_ymd_and_hms(2025, 3, 20, start, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, end, 0, 0).unwrap(),
            id,
        )
    }

    fn ids(pairs: &[Pair]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(a, b)| (a.id.clone(), b.id.clone()))
            .collect()
    }

    #[test]
    fn test_sweep_three_way_overlap() {
        let events = [ev("a", 9, 12), ev("b", 10, 13), ev("c", 11, 14)];
        let sorted: Vec<&CareEvent> = events.iter().collect();

        assert_eq!(
            ids(&sweep(&sorted)),
            vec![
                ("a".into(), "b".into()),
                ("a".into(), "c".into()),
                ("b".into(), "c".into()),
            ]
        );
        assert_eq!(
            ids(&adjacent(&sorted)),
            vec![("a".into(), "b".into()), ("b".into(), "c".into())]
        );
    }

    #[test]
    fn test_sweep_resets_after_gap() {
        let events = [ev("a", 8, 9), ev("b", 10, 12), ev("c", 11, 12)];
        let sorted: Vec<&CareEvent> = events.iter().collect();

        assert_eq!(ids(&sweep(&sorted)), vec![("b".into(), "c".into())]);
    }
}
