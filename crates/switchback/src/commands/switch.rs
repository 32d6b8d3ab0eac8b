use crate::app::{now_ms, App};
use switchback_core::{SwitchOutcome, TargetOrigin};

fn describe_origin(origin: TargetOrigin) -> &'static str {
    match origin {
        TargetOrigin::Policy => "selected by policy",
        TargetOrigin::PreviousLaunch => "previous launch",
        TargetOrigin::LastLaunch => "last launch",
    }
}

pub fn run(policy: Option<&str>, dry_run: bool) -> anyhow::Result<()> {
    let mut app = App::open()?;
    let (preset, policy) = app.policy(policy)?;
    let now = now_ms();

    if dry_run {
        match app.engine.resolve_target(&policy, now)? {
            Some(target) => println!(
                "{} ({}, policy {})",
                target.package,
                describe_origin(target.origin),
                preset.name()
            ),
            None => println!("No recent app to switch to"),
        }
        return Ok(());
    }

    let mut launcher = app.launcher();
    let outcome = app.engine.switch_back(&mut launcher, &policy, now)?;
    println!("{}", outcome.message());

    if let SwitchOutcome::NoTarget {
        permission_required: true,
    } = outcome
    {
        println!(
            "Usage log not found at {}",
            app.paths.events_file().display()
        );
    }
    Ok(())
}
