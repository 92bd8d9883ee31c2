//! Error types for rolesync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from rolesync-core
    #[error(transparent)]
    Core(#[from] rolesync_core::Error),

    /// Error from rolesync-manifest
    #[error(transparent)]
    Manifest(#[from] rolesync_manifest::Error),

    /// Tracing subscriber could not be installed
    #[error("setting tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}
