use crate::app::App;
use crate::launcher::is_valid_package;

pub fn run_list() -> anyhow::Result<()> {
    let mut app = App::open()?;
    let excluded = app.engine.exclusions().all()?;

    if excluded.is_empty() {
        println!("No excluded apps");
        return Ok(());
    }

    println!("Excluded Apps ({})", excluded.len());
    println!("=============");
    for package in &excluded {
        println!("  {}", package);
    }
    Ok(())
}

pub fn run_add(package: &str) -> anyhow::Result<()> {
    if !is_valid_package(package) {
        anyhow::bail!("invalid package id: {}", package);
    }

    let mut app = App::open()?;
    if app.engine.exclusions().add(package)? {
        println!("Excluded {}", package);
    } else {
        println!("{} is already excluded", package);
    }
    Ok(())
}

pub fn run_remove(package: &str) -> anyhow::Result<()> {
    let mut app = App::open()?;
    if app.engine.exclusions().remove(package)? {
        println!("{} is no longer excluded", package);
    } else {
        println!("{} was not excluded", package);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use switchback_store::{JsonFileStore, KeyValueStore, HOME_ENV};

    #[test]
    #[serial]
    fn test_add_and_remove_persist() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var(HOME_ENV, temp.path());

        run_add("com.example.ads").unwrap();
        let store = JsonFileStore::open(&temp.path().join("store.json")).unwrap();
        let set = store.get_set("excludedApps").unwrap().unwrap();
        assert!(set.contains("com.example.ads"));
        assert!(set.contains("com.android.systemui"), "defaults seeded");

        run_remove("com.example.ads").unwrap();
        let store = JsonFileStore::open(&temp.path().join("store.json")).unwrap();
        let set = store.get_set("excludedApps").unwrap().unwrap();
        assert!(!set.contains("com.example.ads"));

        assert!(run_add("not-a-package").is_err());

        std::env::remove_var(HOME_ENV);
    }
}
