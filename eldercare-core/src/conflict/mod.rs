//! Schedule conflict detection.
//!
//! Events are grouped per elder, sorted by start time and scanned for
//! overlapping pairs. Two scan strategies exist:
//!
//! - [`ScanStrategy::Adjacent`] compares each event with its immediate
//!   predecessor only. This is what the care dashboard has always shown and
//!   is the default, but it misses an overlap between events 1 and 3 when
//!   event 2 sits between them without overlapping either.
//! - [`ScanStrategy::Sweep`] keeps every still-open event and reports all
//!   overlapping pairs.

mod group;
mod record;
mod scan;
mod strategy;

pub use record::ConflictRecord;
pub use strategy::ScanStrategy;

use crate::elder::{Elder, Roster};
use crate::event::CareEvent;
use group::ElderGroups;

/// Detect overlapping events per elder using the adjacent-pair scan.
pub fn detect_conflicts<'a>(
    events: &'a [CareEvent],
    elders: &'a [Elder],
) -> Vec<ConflictRecord<'a>> {
    detect_conflicts_with(events, elders, ScanStrategy::Adjacent)
}

/// Detect overlapping events per elder.
///
/// Output order is elder groups in the order their id was first seen in
/// `events`, then pairs in scan order. Never fails: events without elder ids
/// are ignored and elders missing from the roster yield records with
/// `elder == None`.
pub fn detect_conflicts_with<'a>(
    events: &'a [CareEvent],
    elders: &'a [Elder],
    strategy: ScanStrategy,
) -> Vec<ConflictRecord<'a>> {
    let roster = Roster::new(elders);
    let groups = ElderGroups::build(events);

    let mut conflicts = Vec::new();

    for (elder_id, sorted) in groups.into_sorted() {
        let pairs = match strategy {
            ScanStrategy::Adjacent => scan::adjacent(&sorted),
            ScanStrategy::Sweep => scan::sweep(&sorted),
        };

        let elder = roster.get(elder_id);
        if elder.is_none() && !pairs.is_empty() {
            log::debug!("Elder '{}' has conflicts but is not in the roster", elder_id);
        }

        conflicts.extend(
            pairs
                .into_iter()
                .map(|(first, second)| ConflictRecord::new(elder_id, elder, first, second)),
        );
    }

    log::debug!(
        "Found {} conflicts in {} events ({} strategy)",
        conflicts.len(),
        events.len(),
        strategy
    );

    conflicts
}
