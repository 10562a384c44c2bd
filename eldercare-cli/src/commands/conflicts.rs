use anyhow::Result;
use eldercare_core::date_range::DateRange;
use eldercare_core::{ConflictRecord, ScanStrategy, Schedule, detect_conflicts_with};
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn run(
    schedule: &Schedule,
    range: &DateRange,
    strategy: ScanStrategy,
    elder: Option<&str>,
    json: bool,
) -> Result<()> {
    let events = schedule.events_in_range(range);

    let conflicts: Vec<ConflictRecord> = detect_conflicts_with(&events, &schedule.elders, strategy)
        .into_iter()
        .filter(|c| elder.is_none_or(|id| c.elder_id == id))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("{}", "No conflicts found".dimmed());
        return Ok(());
    }

    // Records arrive grouped by elder, so a header on each change is enough
    let mut current_elder: Option<&str> = None;

    for conflict in &conflicts {
        if current_elder != Some(conflict.elder_id) {
            if current_elder.is_some() {
                println!();
            }
            println!("👤 {}", conflict.elder_label().bold());
            current_elder = Some(conflict.elder_id);
        } else {
            println!();
        }

        println!("{}", conflict.render());
    }

    println!();
    println!(
        "{}",
        format!(
            "{} {} ({} scan)",
            conflicts.len(),
            pluralize("conflict", conflicts.len()),
            strategy
        )
        .dimmed()
    );

    Ok(())
}
