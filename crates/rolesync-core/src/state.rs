//! Per-role install bookkeeping.
//!
//! Each installed role carries a `meta/.galaxy_install_info` file recording
//! when it was installed, at which pinned version, and the resolved commit.
//! Absence of the file means "not installed".

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

use rolesync_manifest::Entry;

use crate::error::{Error, Result};

/// Timestamp layout used by ansible-galaxy, trailing space included.
const INSTALL_DATE_FORMAT: &str = "%a %d %b %Y %I:%M:%S %p ";

/// Relative location of the install-info file inside a role directory.
const INSTALL_INFO_PATH: &str = "meta/.galaxy_install_info";

/// Contents of `meta/.galaxy_install_info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallInfo {
    /// Human-readable install timestamp.
    #[serde(default)]
    pub install_date: String,

    /// Pinned version at the time of install.
    #[serde(default)]
    pub version: String,

    /// Commit the role was installed from; not every writer records it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_commit: Option<String>,
}

impl InstallInfo {
    /// Builds a fresh record for `entry` at `commit`, stamped with the
    /// current local time.
    pub fn new(entry: &Entry, commit: &str) -> Self {
        Self {
            install_date: Local::now().format(INSTALL_DATE_FORMAT).to_string(),
            version: entry.version.clone(),
            install_commit: (!commit.is_empty()).then(|| commit.to_string()),
        }
    }
}

/// Directory the role installs into.
pub fn role_path(roles_path: &Path, entry: &Entry) -> PathBuf {
    roles_path.join(entry.name())
}

/// Location of the role's install-info file.
pub fn install_info_path(roles_path: &Path, entry: &Entry) -> PathBuf {
    role_path(roles_path, entry).join(INSTALL_INFO_PATH)
}

/// Reads the role's install info.
///
/// Never fails: a missing file means "not installed" and yields the default
/// record; an unreadable or malformed file is logged and degrades the same
/// way rather than aborting an install pass.
pub fn read_install_info(roles_path: &Path, entry: &Entry) -> InstallInfo {
    let path = install_info_path(roles_path, entry);
    let raw = match fs::read(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return InstallInfo::default(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read install info");
            return InstallInfo::default();
        }
    };
    match serde_yaml::from_slice(&raw) {
        Ok(info) => info,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "malformed install info");
            InstallInfo::default()
        }
    }
}

/// Writes the role's install info with owner-only permissions.
pub fn write_install_info(roles_path: &Path, entry: &Entry, info: &InstallInfo) -> Result<()> {
    let body = serde_yaml::to_string(info)?;
    let path = install_info_path(roles_path, entry);
    write_private(&path, body.as_bytes()).map_err(|source| Error::WriteInstallInfo {
        path: path.clone(),
        source,
    })
}

/// True when the role directory exists and the stored version matches the
/// entry's pin exactly. Commit-level equality is checked separately inside
/// the installer.
pub fn is_installed(roles_path: &Path, entry: &Entry) -> bool {
    if !role_path(roles_path, entry).exists() {
        return false;
    }
    read_install_info(roles_path, entry).version == entry.version
}

/// Writes `bytes` to `path` with owner-only permissions on Unix.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(bytes)
    }
    #[cfg(not(unix))]
    fs::write(path, bytes)
}
