use switchback_core::{Config, Preset};
use switchback_store::Paths;

fn render(default_policy: &str) -> String {
    let mut out = String::from("Selection Policies\n==================");
    for preset in Preset::ALL {
        let marker = if preset.name() == default_policy { "*" } else { " " };
        out.push_str(&format!(
            "\n {} {:<16} {}",
            marker,
            preset.name(),
            preset.description()
        ));
    }
    out
}

pub fn run() -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = Config::load(&paths.config_file());
    println!("{}", render(&config.default_policy));
    Ok(())
}
