//! Subprocess execution with combined output capture.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Runs `program` with `args` in `dir` (or the inherited cwd), capturing
/// stdout and stderr.
///
/// Returns the combined output with trailing newlines trimmed. A non-zero
/// exit status is an error that still carries the combined output, since git
/// writes its diagnostics there.
pub async fn run(program: &str, args: &[&str], dir: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await.map_err(|source| Error::Spawn {
        program: program.to_string(),
        source,
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim_end_matches('\n').to_string();

    debug!(program, ?args, cwd = ?dir, output = %combined, "executed");

    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            output: combined,
        });
    }

    Ok(combined)
}
