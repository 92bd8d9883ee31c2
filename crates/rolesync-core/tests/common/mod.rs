//! Real git fixtures for sync tests, built with the `git` CLI.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

/// Runs a git command in `dir`, panicking on failure.
pub fn git(args: &[&str], dir: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Creates a role repository at `path` with one commit tagged `tag`.
///
/// The tree carries a `meta/` directory, like every galaxy role, so the
/// install-info file has a home after extraction.
pub fn role_repo(path: &Path, tag: &str) {
    fs::create_dir_all(path.join("meta")).unwrap();
    fs::write(path.join("meta/main.yml"), "---\ndependencies: []\n").unwrap();
    fs::create_dir_all(path.join("tasks")).unwrap();
    fs::write(path.join("tasks/main.yml"), "---\n").unwrap();

    git(&["init", "-q"], path);
    git(&["config", "user.email", "test@test.com"], path);
    git(&["config", "user.name", "Test User"], path);
    git(&["config", "commit.gpgsign", "false"], path);
    git(&["add", "."], path);
    git(&["commit", "-q", "-m", "initial"], path);
    git(&["tag", tag], path);
}

/// A `git+file://` source URL for a fixture repository.
pub fn file_src(path: &Path) -> String {
    format!("git+file://{}", path.display())
}
