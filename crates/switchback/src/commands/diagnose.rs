use crate::app::{now_ms, App};
use switchback_core::{ExclusionSet, UsageDataProvider};

fn annotate(packages: &[String], self_package: &str, excluded: &ExclusionSet) -> Vec<String> {
    packages
        .iter()
        .map(|p| {
            if p == self_package {
                format!("{} [self]", p)
            } else if excluded.contains(p) {
                format!("{} [excluded]", p)
            } else {
                p.clone()
            }
        })
        .collect()
}

pub fn run() -> anyhow::Result<()> {
    let mut app = App::open()?;
    let now = now_ms();

    let excluded = app.engine.exclusions().all()?;
    let provider = app.engine.provider();

    println!("switchback diagnostics");
    println!("======================");
    println!("Home:           {}", app.paths.home.display());
    println!("Store:          {}", app.paths.store_file().display());
    println!("Usage access:   {}", provider.has_usage_access());
    println!("Events:         {}", provider.event_count());
    println!("Window changes: {}", provider.window_changes().len());
    println!("Excluded:       {}", excluded.len());
    println!();

    let self_package = app.engine.config().self_package.clone();
    let list = app.engine.diagnostic_list(now);
    if list.is_empty() {
        println!("No events in the last 24 hours");
        return Ok(());
    }

    println!("Unfiltered history (24h, most recent first)");
    for (i, line) in annotate(&list, &self_package, &excluded).iter().enumerate() {
        println!("  {:>2}. {}", i + 1, line);
    }
    Ok(())
}
