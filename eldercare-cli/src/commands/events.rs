use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use eldercare_core::Schedule;
use eldercare_core::date_range::DateRange;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(schedule: &Schedule, range: &DateRange, elder: Option<&str>) -> Result<()> {
    let mut events = schedule.events_in_range(range);

    if let Some(id) = elder {
        events.retain(|e| e.involves(id));
    }

    // Sort by start time
    events.sort_by(|a, b| (a.start, &a.id).cmp(&(b.start, &b.id)));

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<String> = None;

    for event in &events {
        let date_label = format_date_label(event.start);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let elders: Vec<String> = event
            .elder_ids
            .iter()
            .map(|id| match schedule.elder(id) {
                Some(e) => e.to_string(),
                None => id.clone(),
            })
            .collect();

        println!(
            "  {:>5} {} {} {}",
            event.start.with_timezone(&Local).format("%H:%M"),
            event.title,
            event.kind.render(),
            format!("({})", elders.join(", ")).dimmed()
        );
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(time: DateTime<Utc>) -> String {
    let today = Local::now().date_naive();
    let date = time.with_timezone(&Local).date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
