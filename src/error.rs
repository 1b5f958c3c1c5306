//! Error types for devrel

use thiserror::Error;

/// Errors that can abort a devrel run
///
/// Every variant is fatal for the run. There is no compensating rollback, so
/// a `Publish` error may leave the remote release partially reconciled.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (token, arguments, config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Required local artifact files are missing or ambiguous
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Non-success response while reading remote state
    #[error("failed to fetch from GitHub: {0}")]
    Fetch(String),

    /// Non-success response while mutating remote state
    #[error("failed to publish to GitHub: {0}")]
    Publish(String),

    /// Local repository mirror cannot sync or resolve a branch
    #[error("repository sync error: {0}")]
    Sync(String),
}

/// Result alias used throughout devrel
pub type Result<T> = std::result::Result<T, Error>;
