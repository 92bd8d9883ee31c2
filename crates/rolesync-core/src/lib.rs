//! Core synchronization engine for rolesync
//!
//! Sits between the manifest loader and the git plumbing: decides which
//! requirements entries need work, drives concurrent installs through a
//! bounded worker pool, and keeps the per-role install bookkeeping.
//!
//! ```text
//!        rolesync-cli
//!             |
//!       rolesync-core
//!        |         |
//! rolesync-manifest  rolesync-git
//! ```

pub mod changes;
pub mod error;
pub mod install;
pub mod state;
pub mod sync;
pub mod update;

pub use changes::{Change, Changes};
pub use error::{Error, Result};
pub use state::InstallInfo;
pub use sync::{SyncOptions, SyncReport, Syncer};
pub use update::{FloatingRefs, resolve_latest, resolve_latest_versions};
