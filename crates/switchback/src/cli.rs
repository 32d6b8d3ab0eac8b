use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "switchback")]
#[command(version)]
#[command(about = "Switch back to the app you used before")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a usage event to the event log
    Record {
        /// Package id, e.g. com.netflix.ninja
        package: String,

        /// Event kind name or numeric platform code
        #[arg(short, long, default_value = "foreground")]
        kind: String,

        /// Timestamp in ms since the epoch (defaults to now)
        #[arg(long)]
        at: Option<i64>,

        /// Record as a window change seen by the automation host
        #[arg(long)]
        window: bool,
    },

    /// List recently used apps, most recent first
    Recent {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Launch the app to switch back to
    Switch {
        /// Policy preset (see `switchback policies`)
        #[arg(short, long)]
        policy: Option<String>,

        /// Print the target without launching it
        #[arg(long)]
        dry_run: bool,
    },

    /// Launch a package and record it in the launch history
    Launch { package: String },

    /// Show the launch history
    History,

    /// Manage excluded apps
    Exclude {
        #[command(subcommand)]
        action: Option<ExcludeAction>,
    },

    /// List selection policy presets
    Policies,

    /// Dump unfiltered history and data source status
    Diagnose,

    /// Refresh the recent list periodically, printing changes
    Watch {
        /// Number of refreshes before exiting; 0 runs until Ctrl-C
        #[arg(short, long, default_value_t = 10)]
        ticks: usize,
    },
}

#[derive(Subcommand)]
pub enum ExcludeAction {
    /// List excluded packages
    List,
    /// Exclude a package from history and switching
    Add { package: String },
    /// Stop excluding a package
    Remove { package: String },
}
