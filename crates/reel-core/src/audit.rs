use reel_models::LogEvent;

/// One calendar day's worth of audit events, labelled for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub label: String,
    pub events: Vec<LogEvent>,
}

/// Append an event at the head of the log. The log is most-recent-first and
/// append-only: events are never merged, deduplicated, or rewritten.
pub fn record(logs: &mut Vec<LogEvent>, event: LogEvent) {
    logs.insert(0, event);
}

/// Group the log by calendar day for display.
///
/// Events keep the log's own order within each day, and days appear in the
/// order they are first encountered — they are not re-sorted, so the timeline
/// stays stable as new events land at the head.
pub fn grouped_by_day(logs: &[LogEvent]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for event in logs {
        let label = day_label(event);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.events.push(event.clone()),
            None => groups.push(DayGroup {
                label,
                events: vec![event.clone()],
            }),
        }
    }
    groups
}

fn day_label(event: &LogEvent) -> String {
    event.log_time.format("%b %-d, %Y").to_string()
}
