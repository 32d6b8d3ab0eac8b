pub mod diagnose;
pub mod exclude;
pub mod history;
pub mod launch;
pub mod policies;
pub mod recent;
pub mod record;
pub mod switch;
pub mod watch;
