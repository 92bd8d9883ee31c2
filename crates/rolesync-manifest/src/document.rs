//! Requirements document operations: load, merge, dedup, persist.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::entry::Entry;
use crate::error::{Error, Result};

/// On-disk shape B: a map with a single `roles` key holding the sequence.
#[derive(Debug, Deserialize)]
struct RolesDocument {
    roles: Vec<Entry>,
}

/// Loads a requirements document from `path`.
///
/// Returns the document's own entries (deduplicated, sorted by name) plus
/// every entry discovered through `include` pointers. Includes are followed
/// one level deep only: an `include` inside an included document is ignored,
/// since nothing relies on deeper nesting.
///
/// Any failure while loading an included document aborts the whole load,
/// wrapped with the include path.
pub fn load(path: impl AsRef<Path>) -> Result<(Vec<Entry>, Vec<Entry>)> {
    load_at_depth(path.as_ref(), 0)
}

fn load_at_depth(path: &Path, depth: usize) -> Result<(Vec<Entry>, Vec<Entry>)> {
    let raw = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // Shape A (bare sequence) first, then shape B ({roles: [...]}).
    let entries: Vec<Entry> = match serde_yaml::from_slice(&raw) {
        Ok(entries) => entries,
        Err(_) => serde_yaml::from_slice::<RolesDocument>(&raw)
            .map(|doc| doc.roles)
            .map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            })?,
    };

    let mut entries = dedup(entries);
    sort_by_name(&mut entries);

    let mut included = Vec::new();
    if depth == 0 {
        for entry in &entries {
            let Some(include) = entry.include.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            debug!(path = include, "loading included requirements");
            let (sub_main, sub_included) =
                load_at_depth(Path::new(include), depth + 1).map_err(|source| Error::Include {
                    path: include.to_string(),
                    source: Box::new(source),
                })?;
            included.extend(sub_main);
            included.extend(sub_included);
        }
    }

    Ok((entries, included))
}

/// Merges a main entry set with any number of included batches.
///
/// Entries are keyed by derived name; the main document always wins on a
/// collision. The result is sorted by name.
pub fn merge(main: Vec<Entry>, included: Vec<Vec<Entry>>) -> Vec<Entry> {
    let mut by_name: BTreeMap<String, Entry> = BTreeMap::new();
    for entry in main {
        let name = entry.name().to_string();
        by_name.entry(name).or_insert(entry);
    }
    for batch in included {
        for entry in batch {
            let name = entry.name().to_string();
            by_name.entry(name).or_insert(entry);
        }
    }
    by_name.into_values().collect()
}

/// Removes duplicate entries by name, keeping the first occurrence.
pub fn dedup(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.name().to_string()))
        .collect()
}

/// Sorts entries by derived name, ascending.
pub fn sort_by_name(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.name().cmp(b.name()));
}

/// Number of directly installable entries, i.e. those without `include`.
pub fn installable_len(entries: &[Entry]) -> usize {
    entries.iter().filter(|entry| !entry.is_include()).count()
}

/// Writes `entries` back to `path` as a bare-sequence document.
///
/// The output is prefixed with a document-start marker and a blank line so
/// yamllint-checked trees stay clean. Write failures are reported, not
/// retried.
pub fn persist(entries: &[Entry], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let body = serde_yaml::to_string(entries)?;
    let mut out = String::with_capacity(body.len() + 5);
    out.push_str("---\n\n");
    out.push_str(&body);
    write_private(path, out.as_bytes()).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
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
