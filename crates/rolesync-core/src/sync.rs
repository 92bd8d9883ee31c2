//! Bounded-concurrency role synchronization.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use rolesync_manifest::Entry;

use crate::changes::Changes;
use crate::error::{Error, Result};
use crate::install::install_role;
use crate::state;
use crate::update::FloatingRefs;

/// Options controlling a sync pass.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Maximum concurrent installs; 0 means one worker per entry.
    pub limit: usize,
    /// Remove per-role scratch directories and archives when done.
    pub cleanup: bool,
    /// Floating branch refs that are never reported as version changes.
    pub floating: FloatingRefs,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            cleanup: true,
            floating: FloatingRefs::default(),
        }
    }
}

/// Outcome of a sync pass: the changes that landed plus any per-entry
/// failures. Partial success is normal; a failed entry never rolls back its
/// siblings.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub changes: Changes,
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Summary of applied changes, or `None` when nothing changed.
    pub fn summary(&self) -> Option<String> {
        (!self.changes.is_empty()).then(|| self.changes.summary("roles updated:\n"))
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapses the collected failures into one aggregate error, keeping
    /// `Ok` when every entry succeeded or was skipped.
    pub fn into_result(self) -> Result<Changes> {
        if self.errors.is_empty() {
            Ok(self.changes)
        } else {
            Err(Error::Aggregate {
                messages: self.errors,
            })
        }
    }
}

/// Result of one worker unit; drained single-threaded after the pool joins.
enum WorkerOutcome {
    Skipped,
    Installed {
        role: String,
        old_version: String,
        new_version: String,
    },
    Failed(String),
}

/// Drives installation of every entry that is missing or out of date.
pub struct Syncer {
    roles_path: PathBuf,
    options: SyncOptions,
}

impl Syncer {
    pub fn new(roles_path: impl Into<PathBuf>, options: SyncOptions) -> Self {
        Self {
            roles_path: roles_path.into(),
            options,
        }
    }

    /// Installs every entry that [`state::is_installed`] rejects, at most
    /// `limit` at a time, and reports changes and failures.
    ///
    /// The roles directory is bootstrapped once, before any worker starts.
    /// Worker results are collected after the pool has fully joined, so the
    /// report never races with in-flight installs.
    pub async fn sync(&self, entries: &[Entry]) -> Result<SyncReport> {
        bootstrap_roles(&self.roles_path)?;

        let installable: Vec<Entry> = entries
            .iter()
            .filter(|entry| !entry.is_include())
            .cloned()
            .collect();
        let limit = match self.options.limit {
            0 => installable.len().max(1),
            n => n,
        };

        let semaphore = Arc::new(Semaphore::new(limit));
        let mut tasks = JoinSet::new();
        for entry in installable {
            let semaphore = Arc::clone(&semaphore);
            let roles_path = self.roles_path.clone();
            let cleanup = self.options.cleanup;
            let floating = self.options.floating.clone();
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return WorkerOutcome::Failed(format!(
                            "installing {}@{}: worker pool closed",
                            entry.name(),
                            entry.version
                        ));
                    }
                };
                sync_one(&roles_path, &entry, cleanup, &floating).await
            });
        }

        let mut report = SyncReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(WorkerOutcome::Skipped) => {}
                Ok(WorkerOutcome::Installed {
                    role,
                    old_version,
                    new_version,
                }) => report.changes.add(role, old_version, new_version),
                Ok(WorkerOutcome::Failed(msg)) => report.errors.push(msg),
                Err(err) => report.errors.push(format!("install task failed: {err}")),
            }
        }

        Ok(report)
    }

    /// Entries whose on-disk install info records a version.
    pub fn list_installed(&self, entries: &[Entry]) -> Vec<Entry> {
        entries
            .iter()
            .filter(|entry| !state::read_install_info(&self.roles_path, entry).version.is_empty())
            .cloned()
            .collect()
    }

    /// Removes the named installed role's directory.
    pub fn delete_installed(&self, entries: &[Entry], name: &str) -> Result<()> {
        let installed = self.list_installed(entries);
        let Some(entry) = installed.iter().find(|entry| entry.name() == name) else {
            return Err(Error::UnknownRole(name.to_string()));
        };
        fs::remove_dir_all(state::role_path(&self.roles_path, entry))?;
        Ok(())
    }
}

/// One unit of work: skip, install, or record the failure.
async fn sync_one(
    roles_path: &Path,
    entry: &Entry,
    cleanup: bool,
    floating: &FloatingRefs,
) -> WorkerOutcome {
    if state::is_installed(roles_path, entry) {
        debug!(role = entry.name(), "already installed");
        return WorkerOutcome::Skipped;
    }

    let old_version = state::read_install_info(roles_path, entry).version;
    match install_role(roles_path, entry, cleanup).await {
        Ok(true) => {
            info!(role = entry.name(), version = %entry.version, "installed");
            // Floating refs have no stable target version to diff against.
            if floating.contains(&entry.version) {
                WorkerOutcome::Skipped
            } else {
                WorkerOutcome::Installed {
                    role: entry.name().to_string(),
                    old_version,
                    new_version: entry.version.clone(),
                }
            }
        }
        Ok(false) => WorkerOutcome::Skipped,
        Err(err) => WorkerOutcome::Failed(format!(
            "installing {}@{}: {err}",
            entry.name(),
            entry.version
        )),
    }
}

/// Creates the roles directory, owner-only, if it does not exist yet.
fn bootstrap_roles(roles_path: &Path) -> Result<()> {
    if roles_path.exists() {
        return Ok(());
    }
    // Single level only: a missing parent is the caller's problem, and
    // intermediate directories must not appear with default permissions.
    fs::create_dir(roles_path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(roles_path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
