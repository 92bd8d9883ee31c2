//! Concurrent version-update pass over a requirements entry set.

use tokio::task::JoinSet;
use tracing::debug;

use rolesync_git::remote::latest_remote_tag;
use rolesync_manifest::Entry;

use crate::changes::Changes;
use crate::error::{Error, Result};

/// Versions that are floating branch refs rather than stable pins.
///
/// Floating refs are never auto-upgraded by tag comparison and never
/// reported as version changes. Carried as an explicit value, not global
/// state, so tests can substitute a different convention.
#[derive(Debug, Clone)]
pub struct FloatingRefs(Vec<String>);

impl FloatingRefs {
    pub fn new(refs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(refs.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, version: &str) -> bool {
        self.0.iter().any(|r| r == version)
    }
}

impl Default for FloatingRefs {
    fn default() -> Self {
        Self::new(["main", "master"])
    }
}

/// Decides whether a newer tag exists for one entry.
///
/// Floating refs and non-git sources are skipped outright, without a remote
/// call. Returns `None` when the remote's highest tag equals `current`.
pub async fn resolve_latest(
    src: &str,
    current: &str,
    floating: &FloatingRefs,
) -> Result<Option<String>> {
    if floating.contains(current) {
        return Ok(None);
    }

    // not a git repo
    if !src.contains("git") {
        return Ok(None);
    }

    match latest_remote_tag(src).await? {
        Some(tag) if tag != current => Ok(Some(tag)),
        _ => Ok(None),
    }
}

/// Rewrites every installable entry's version to the latest remote tag.
///
/// One task per entry; each task reports `(index, new_version)` back and the
/// slice is updated single-threaded after the join, so no entry slot is ever
/// written concurrently. Per-entry failures are collected and joined into one
/// aggregate error; entries that resolved cleanly keep their bumped versions
/// either way.
pub async fn resolve_latest_versions(
    entries: &mut [Entry],
    floating: &FloatingRefs,
) -> Result<Changes> {
    let mut tasks = JoinSet::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.is_include() {
            continue;
        }
        let src = entry.src.clone();
        let current = entry.version.clone();
        let name = entry.name().to_string();
        let floating = floating.clone();
        tasks.spawn(async move {
            let outcome = resolve_latest(&src, &current, &floating)
                .await
                .map_err(|err| format!("getting new version for {name}@{current}: {err}"));
            (idx, outcome)
        });
    }

    let mut changes = Changes::default();
    let mut errors = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, Ok(Some(new_version)))) => {
                let entry = &mut entries[idx];
                let name = entry.name().to_string();
                debug!(role = %name, old = %entry.version, new = %new_version, "version update");
                changes.add(name, entry.version.clone(), new_version.clone());
                entry.version = new_version;
            }
            Ok((_, Ok(None))) => {}
            Ok((_, Err(msg))) => errors.push(msg),
            Err(err) => errors.push(format!("update task failed: {err}")),
        }
    }

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(Error::Aggregate { messages: errors })
    }
}
