//! Error types for rolesync-core

use std::path::PathBuf;

/// Result type for rolesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while updating versions or installing roles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scratch directory for a role install could not be created
    #[error("creating tmp dir: {0}")]
    TempDir(std::io::Error),

    /// Install info could not be serialized
    #[error("generating install info: {0}")]
    InstallInfo(#[from] serde_yaml::Error),

    /// Install info could not be written after a successful extract
    #[error("writing install info {path}: {source}")]
    WriteInstallInfo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No installed role matches the requested name
    #[error("role {0} is not installed")]
    UnknownRole(String),

    /// One or more per-entry failures, messages joined one per line
    #[error("{}", .messages.join("\n"))]
    Aggregate { messages: Vec<String> },

    /// Manifest error from rolesync-manifest
    #[error(transparent)]
    Manifest(#[from] rolesync_manifest::Error),

    /// Git subprocess error from rolesync-git
    #[error(transparent)]
    Git(#[from] rolesync_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
