use crate::app::{now_ms, App};
use crate::launcher::is_valid_package;
use switchback_core::SwitchError;

pub fn run(package: &str) -> anyhow::Result<()> {
    if !is_valid_package(package) {
        anyhow::bail!("invalid package id: {}", package);
    }

    let mut app = App::open()?;
    let mut launcher = app.launcher();

    match app.engine.launch(&mut launcher, package, now_ms()) {
        Ok(_) => println!("Launched {}", package),
        Err(SwitchError::LaunchUnresolvable(package)) => {
            println!("{} cannot be launched", package)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
