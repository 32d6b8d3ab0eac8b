//! Engine error types

use switchback_store::StoreError;

/// Failures surfaced by the engine. Missing data and missing candidates are
/// not errors; they show up as empty results.
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0} cannot be launched")]
    LaunchUnresolvable(String),

    #[error("launching {package} failed: {message}")]
    Launch { package: String, message: String },
}

pub type Result<T> = std::result::Result<T, SwitchError>;
