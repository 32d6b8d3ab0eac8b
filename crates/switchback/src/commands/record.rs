use crate::app::now_ms;
use crate::launcher::is_valid_package;
use crate::provider::EventRecord;
use switchback_core::EventKind;
use switchback_store::{append_jsonl, Paths};

/// Accepts kind names (`foreground`, `paused`, ...) or raw platform codes
fn parse_kind(kind: &str) -> anyhow::Result<EventKind> {
    if let Ok(code) = kind.parse::<i32>() {
        return Ok(EventKind::from_code(code));
    }

    let parsed = match kind.to_ascii_lowercase().as_str() {
        "foreground" | "fg" => EventKind::Foreground,
        "background" | "bg" => EventKind::Background,
        "resumed" => EventKind::Resumed,
        "paused" => EventKind::Paused,
        "stopped" => EventKind::Stopped,
        "interaction" => EventKind::Interaction,
        "notification" => EventKind::Notification,
        other => anyhow::bail!("unknown event kind: {}", other),
    };
    Ok(parsed)
}

pub fn run(package: &str, kind: &str, at: Option<i64>, window: bool) -> anyhow::Result<()> {
    if !is_valid_package(package) {
        anyhow::bail!("invalid package id: {}", package);
    }

    let record = EventRecord {
        package_id: package.to_string(),
        timestamp: at.unwrap_or_else(now_ms),
        kind: parse_kind(kind)?,
        window_change: window,
    };

    let paths = Paths::new()?;
    append_jsonl(&paths.events_file(), &record)?;
    println!("Recorded {:?} {} at {}", record.kind, record.package_id, record.timestamp);
    Ok(())
}
