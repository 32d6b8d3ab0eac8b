mod app;
mod cli;
mod commands;
mod launcher;
mod provider;

use clap::Parser;
use cli::{Cli, Commands, ExcludeAction};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Record {
            package,
            kind,
            at,
            window,
        } => commands::record::run(&package, &kind, at, window),
        Commands::Recent { limit } => commands::recent::run(limit),
        Commands::Switch { policy, dry_run } => commands::switch::run(policy.as_deref(), dry_run),
        Commands::Launch { package } => commands::launch::run(&package),
        Commands::History => commands::history::run(),
        Commands::Exclude { action } => match action {
            Some(ExcludeAction::List) | None => commands::exclude::run_list(),
            Some(ExcludeAction::Add { package }) => commands::exclude::run_add(&package),
            Some(ExcludeAction::Remove { package }) => commands::exclude::run_remove(&package),
        },
        Commands::Policies => commands::policies::run(),
        Commands::Diagnose => commands::diagnose::run(),
        Commands::Watch { ticks } => commands::watch::run(ticks),
    }
}
