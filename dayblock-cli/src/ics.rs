use dayblock_core::{CalendarEvent, Task};

/// Emit the derived calendar as a minimal ICS document.
///
/// Times are written as floating local times (no `Z`), matching the
/// single-timezone model of the planner. UIDs reuse the derived event ids,
/// which are stable per task.
pub fn events_to_ics(events: &[CalendarEvent], tasks: &[Task]) -> String {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//dayblock//EN\n");

    for e in events {
        let summary = e
            .task_id
            .as_ref()
            .and_then(|id| tasks.iter().find(|t| &t.id == id))
            .map(|t| t.title.as_str())
            .unwrap_or("(untitled)");

        s.push_str("BEGIN:VEVENT\n");
        s.push_str(&format!("UID:{}@dayblock\n", e.id));
        s.push_str(&format!("DTSTART:{}\n", e.starts_at.format("%Y%m%dT%H%M%S")));
        s.push_str(&format!("DTEND:{}\n", e.ends_at.format("%Y%m%dT%H%M%S")));
        s.push_str(&format!("SUMMARY:{}\n", escape_ics(summary)));
        s.push_str("END:VEVENT\n");
    }

    s.push_str("END:VCALENDAR\n");
    s
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
