//! Subprocess git and tar plumbing for rolesync
//!
//! Everything here shells out to the system `git` and `tar` binaries rather
//! than linking a VCS implementation. Commands capture combined
//! stdout/stderr, so failures carry the full tool output.

pub mod error;
pub mod remote;
pub mod repo;
pub mod run;

pub use error::{Error, Result};
pub use remote::{latest_remote_tag, parse_latest_tag};
pub use repo::{is_commit_hash, normalize_src};
