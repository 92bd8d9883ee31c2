//! Error types for rolesync-manifest

use std::path::PathBuf;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or writing requirements documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requirements file could not be read
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Neither accepted document shape matched
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// An included document failed to load
    #[error("loading include {path}: {source}")]
    Include { path: String, source: Box<Error> },

    /// Entries could not be serialized back to YAML
    #[error("serializing requirements: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Rewritten requirements file could not be written
    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
