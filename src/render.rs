use chrono::NaiveDate;
use hollowcal_core::{Calendar, Event};
use owo_colors::OwoColorize;

/// Print events grouped by day, ordered by start time.
pub fn print_events(calendar: &Calendar) {
    let mut current_date: Option<String> = None;

    for event in calendar.sorted_by_start() {
        let date_label = format_date_label(event_date(event));

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let time = format_time(event);
        let id_tag = format!("[{}]", event.id);
        println!("  {} {} {}", time, event.title, id_tag.dimmed());
    }
}

/// All-day events carry a calendar date, not an instant; showing them in
/// the local zone could shift them across midnight.
fn event_date(event: &Event) -> NaiveDate {
    if event.all_day {
        event.start.date_naive()
    } else {
        event.start.with_timezone(&chrono::Local).date_naive()
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Fri Mar 20")
fn format_date_label(date: NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Format the time portion of an event (e.g. "15:00" or "all-day")
fn format_time(event: &Event) -> String {
    if event.all_day {
        "all-day".to_string()
    } else {
        format!(
            "{:>7}",
            event.start.with_timezone(&chrono::Local).format("%H:%M")
        )
    }
}
