use crate::app::{now_ms, App};

pub fn run(limit: Option<usize>) -> anyhow::Result<()> {
    let mut app = App::open()?;
    app.engine.refresh(now_ms())?;

    let recent = app.engine.recent();
    if recent.is_empty() {
        if app.engine.has_usage_access() {
            println!("No recently used apps");
        } else {
            println!(
                "No usage data. Record events with `switchback record <package>` (log: {})",
                app.paths.events_file().display()
            );
        }
        return Ok(());
    }

    let shown = limit.unwrap_or(recent.len()).min(recent.len());
    println!("Recent Apps ({} of {})", shown, recent.len());
    println!("===========");
    for (i, package) in recent.iter().take(shown).enumerate() {
        println!("  {:>2}. {}", i + 1, package);
    }
    Ok(())
}
