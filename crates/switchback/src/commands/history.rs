use crate::app::{format_ms, App};
use std::collections::BTreeMap;
use switchback_core::LaunchSnapshot;

fn render(snapshot: &LaunchSnapshot, last_used: &BTreeMap<String, i64>) -> String {
    let mut out = format!(
        "Last:     {}\nPrevious: {}",
        snapshot.last.as_deref().unwrap_or("-"),
        snapshot.previous.as_deref().unwrap_or("-"),
    );

    if !last_used.is_empty() {
        let mut entries: Vec<_> = last_used.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));

        out.push_str("\n\nLast used");
        for (package, at) in entries {
            out.push_str(&format!("\n  {} | {}", format_ms(*at), package));
        }
    }
    out
}

pub fn run() -> anyhow::Result<()> {
    let mut app = App::open()?;
    let history = app.engine.launch_history();
    let snapshot = history.snapshot()?;
    let last_used = history.last_used_times()?;

    if snapshot.last.is_none() {
        println!("No launch history");
        return Ok(());
    }

    println!("{}", render(&snapshot, &last_used));
    Ok(())
}
