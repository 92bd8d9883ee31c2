//! Change accumulation and the human-readable summary.

/// One recorded change: a role was added or moved between versions.
#[derive(Debug, Clone)]
pub struct Change {
    /// Role name.
    pub role: String,
    /// Previously recorded version; empty for a fresh install.
    pub old_version: String,
    /// Version just installed or resolved.
    pub new_version: String,
}

/// Collection of changes with a deterministic rendering.
#[derive(Debug, Clone, Default)]
pub struct Changes(Vec<Change>);

impl Changes {
    /// Records one change.
    pub fn add(
        &mut self,
        role: impl Into<String>,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
    ) {
        self.0.push(Change {
            role: role.into(),
            old_version: old_version.into(),
            new_version: new_version.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Renders `added <role> (<new>); ` or `updated <role> (<old> -> <new>); `
    /// line items sorted by role name, after `prefix`.
    pub fn summary(&self, prefix: &str) -> String {
        let mut items = self.0.clone();
        items.sort_by(|a, b| a.role.cmp(&b.role));

        let mut msg = String::from(prefix);
        for item in &items {
            if item.old_version.is_empty() {
                msg.push_str(&format!("added {} ({}); ", item.role, item.new_version));
            } else {
                msg.push_str(&format!(
                    "updated {} ({} -> {}); ",
                    item.role, item.old_version, item.new_version
                ));
            }
        }
        msg
    }
}
