//! Error types for the handful of fallible operations.
//!
//! Controllers never return these to their callers. Storage and playback
//! failures are logged and absorbed where they happen; only configuration
//! parsing and preference parsing surface a `Result`.

/// Failure talking to the persistent key-value store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The store does not exist or access is blocked (private mode, policy).
    #[error("storage unavailable")]
    Unavailable,
    /// Reading the key failed.
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    /// Writing the key failed (quota, security error).
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// A stored theme value that is not one of `light`, `dark`, `system`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    #[error("invalid theme preference: {0:?}")]
    Invalid(String),
}

/// Rejection of a media play request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    /// Autoplay policy blocked playback until a user gesture.
    #[error("play blocked by autoplay policy")]
    NotAllowed,
    /// The request was interrupted by a new load or pause.
    #[error("play request aborted")]
    Aborted,
    #[error("play failed: {0}")]
    Other(String),
}

/// Error returned by [`crate::config::SiteConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid site config: {0}")]
    Invalid(String),
}
