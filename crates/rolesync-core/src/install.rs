//! Installation of a single role checkout.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use rolesync_git::repo;
use rolesync_manifest::Entry;

use crate::error::{Error, Result};
use crate::state::{self, InstallInfo};

/// Scratch space for one install: a clone directory plus the sibling archive
/// derived from it. When cleanup is enabled both are removed on drop, on
/// every exit path.
struct Workspace {
    dir: PathBuf,
    archive: PathBuf,
    cleanup: bool,
}

impl Workspace {
    fn create(name: &str, cleanup: bool) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("rolesync-{name}-"))
            .tempdir()
            .map_err(Error::TempDir)?
            .keep();
        let mut archive = dir.clone().into_os_string();
        archive.push(".tar");
        Ok(Self {
            dir,
            archive: PathBuf::from(archive),
            cleanup,
        })
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.cleanup {
            return;
        }
        let _ = fs::remove_dir_all(&self.dir);
        let _ = fs::remove_file(&self.archive);
    }
}

/// Clones, packages and extracts one role into `roles_path`, then records
/// its install info.
///
/// Returns `Ok(false)` when the freshly cloned commit matches the recorded
/// `install_commit`: already up to date, nothing on disk is touched. This is
/// a stronger check than the version equality gate in
/// [`state::is_installed`], and catches commit-pinned entries whose version
/// bookkeeping has not caught up.
pub async fn install_role(roles_path: &Path, entry: &Entry, cleanup: bool) -> Result<bool> {
    let name = entry.name();
    let ws = Workspace::create(name, cleanup)?;

    repo::clone_at(&entry.src, &entry.version, &ws.dir).await?;
    let commit = repo::head_commit(&ws.dir).await?;

    let installed = state::read_install_info(roles_path, entry);
    if !commit.is_empty() && installed.install_commit.as_deref() == Some(commit.as_str()) {
        debug!(role = name, commit = %commit, "already up to date");
        return Ok(false);
    }

    repo::archive(name, &entry.version, &ws.archive, &ws.dir).await?;
    repo::extract(&ws.archive, roles_path).await?;

    let info = InstallInfo::new(entry, &commit);
    state::write_install_info(roles_path, entry, &info)?;

    Ok(true)
}
