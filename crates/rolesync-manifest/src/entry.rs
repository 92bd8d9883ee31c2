//! A single requirements entry.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// One dependency declaration from a requirements document.
///
/// An entry either names an installable role (`src` + `version`) or, when
/// `include` is set, points at another requirements document contributing
/// more entries.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Source repository URL, possibly carrying a `git+` scheme decoration.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub src: String,

    /// Pinned version: a tag name or a full 40-hex commit hash.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Explicit name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Path to another requirements document to pull entries from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    #[serde(skip)]
    derived_name: OnceLock<String>,
}

impl Entry {
    /// Creates an installable entry pinned at `version`.
    pub fn new(src: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Sets the explicit name override.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the nested-include pointer.
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Returns the entry's identity: the explicit `name` when set, otherwise
    /// the last path segment of `src` with a trailing `.git` stripped.
    ///
    /// Computed once and memoized; this is the dedup/merge/lookup key.
    pub fn name(&self) -> &str {
        self.derived_name.get_or_init(|| {
            if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
                return name.to_string();
            }
            let base = self
                .src
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(&self.src);
            base.strip_suffix(".git").unwrap_or(base).to_string()
        })
    }

    /// True when this entry pulls in another document instead of naming an
    /// installable role.
    pub fn is_include(&self) -> bool {
        self.include.as_deref().is_some_and(|p| !p.is_empty())
    }
}
