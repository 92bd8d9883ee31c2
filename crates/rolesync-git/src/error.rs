//! Error types for rolesync-git

/// Result type for git subprocess operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from subprocess git/tar invocations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The subprocess could not be started at all
    #[error("spawning {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The subprocess exited non-zero; `output` is combined stdout/stderr
    #[error("{program} failed:\n{output}")]
    CommandFailed { program: String, output: String },

    /// `git ls-remote` output had no `refs/tags/` token on its first line
    #[error("cannot find tag in ls-remote output, line: {line}")]
    MalformedTagListing { line: String },
}
