use chrono::Duration;
use serde::Serialize;

use crate::elder::Elder;
use crate::event::CareEvent;

/// A pair of overlapping events for one elder.
///
/// Borrows from the event list and roster it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecord<'a> {
    pub elder_id: &'a str,
    /// `None` when the elder id is missing from the roster
    pub elder: Option<&'a Elder>,
    /// Earlier-starting event first
    pub events: [&'a CareEvent; 2],
}

impl<'a> ConflictRecord<'a> {
    pub(crate) fn new(
        elder_id: &'a str,
        elder: Option<&'a Elder>,
        first: &'a CareEvent,
        second: &'a CareEvent,
    ) -> Self {
        ConflictRecord {
            elder_id,
            elder,
            events: [first, second],
        }
    }

    pub fn first(&self) -> &'a CareEvent {
        self.events[0]
    }

    pub fn second(&self) -> &'a CareEvent {
        self.events[1]
    }

    /// Length of the time both events share, zero if they only touch.
    pub fn overlap(&self) -> Duration {
        let [a, b] = self.events;
        let start = a.start.max(b.start);
        let end = a.end.min(b.end);
        (end - start).max(Duration::zero())
    }

    /// Elder name for display, falling back to the raw id.
    pub fn elder_label(&self) -> String {
        match self.elder {
            Some(elder) => elder.to_string(),
            None => format!("{} (unknown)", self.elder_id),
        }
    }
}
