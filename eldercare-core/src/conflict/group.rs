use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::event::CareEvent;

/// Events bucketed by elder id, buckets kept in first-seen order.
pub(super) struct ElderGroups<'a> {
    groups: Vec<(&'a str, Vec<&'a CareEvent>)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ElderGroups<'a> {
    pub(super) fn build(events: &'a [CareEvent]) -> Self {
        let mut groups = ElderGroups {
            groups: Vec::new(),
            index: HashMap::new(),
        };

        for event in events {
            for (i, elder_id) in event.elder_ids.iter().enumerate() {
                // The same id listed twice must not put the event in a bucket twice
                if event.elder_ids[..i].contains(elder_id) {
                    continue;
                }
                groups.push(elder_id, event);
            }
        }

        groups
    }

    fn push(&mut self, elder_id: &'a str, event: &'a CareEvent) {
        match self.index.entry(elder_id) {
            Entry::Occupied(slot) => self.groups[*slot.get()].1.push(event),
            Entry::Vacant(slot) => {
                slot.insert(self.groups.len());
                self.groups.push((elder_id, vec![event]));
            }
        }
    }

    /// Consume into buckets with events sorted by start, then id.
    ///
    /// The sort is stable, so fully tied events keep their input order.
    pub(super) fn into_sorted(self) -> Vec<(&'a str, Vec<&'a CareEvent>)> {
        self.groups
            .into_iter()
            .map(|(elder_id, mut events)| {
                events.sort_by(|a, b| (a.start, &a.id).cmp(&(b.start, &b.id)));
                (elder_id, events)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_fan_out_and_order() {
        let t = |h| Utc.with_ymd_and_hms(2025, 3, 20, h, 0, 0).unwrap();
        let events = vec![
            CareEvent::new("late", &["e2", "e1"], t(11), t(12), "Late"),
            CareEvent::new("early", &["e1"], t(8), t(9), "Early"),
            CareEvent::new("dup", &["e3", "e3"], t(8), t(9), "Dup"),
        ];

        let sorted = ElderGroups::build(&events).into_sorted();

        let summary: Vec<(&str, Vec<&str>)> = sorted
            .iter()
            .map(|(id, evs)| (*id, evs.iter().map(|e| e.id.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("e2", vec!["late"]),
                ("e1", vec!["early", "late"]),
                ("e3", vec!["dup"]),
            ]
        );
    }
}
