//! Clone, archive and extract operations for one role checkout.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::run::run;

/// Maximum number of clone attempts, including the first.
pub const CLONE_ATTEMPTS: usize = 5;

/// Base delay for the linear clone backoff (attempt number times this step).
pub const CLONE_RETRY_STEP: Duration = Duration::from_secs(1);

/// Signature git prints when the remote could not be reached. The only
/// failure treated as transient.
const TRANSIENT_SIGNATURE: &str = "Couldn't connect to server";

/// Strips the `git+` scheme decoration some requirements files carry
/// (`git+https://...` becomes `https://...`).
pub fn normalize_src(src: &str) -> &str {
    src.strip_prefix("git+").unwrap_or(src)
}

/// True when `version` looks like a full commit hash: exactly 40 hex digits.
pub fn is_commit_hash(version: &str) -> bool {
    version.len() == 40 && version.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Shallow-clones `src` at `version` into `dest`, retrying transient
/// connection failures.
///
/// A commit pin is fetched through an explicit refspec mapping it into a
/// remote-tracking ref; anything else is treated as a tag or branch name and
/// cloned with `-b`.
pub async fn clone_at(src: &str, version: &str, dest: &Path) -> Result<String> {
    let repo = normalize_src(src).to_string();
    let dest = dest.to_string_lossy().into_owned();

    let mut args: Vec<String> = vec!["clone".into(), "-q".into(), "--depth".into(), "1".into()];
    if is_commit_hash(version) {
        args.push("-c".into());
        args.push(format!(
            "remote.origin.fetch=+{version}:refs/remotes/origin/{version}"
        ));
    } else {
        args.push("-b".into());
        args.push(version.to_string());
    }
    args.push(repo);
    args.push(dest);

    with_retry(|_attempt| {
        let args = args.clone();
        async move {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            run("git", &args, None).await
        }
    })
    .await
}

/// Runs `attempt_fn` up to [`CLONE_ATTEMPTS`] times, sleeping
/// `attempt x CLONE_RETRY_STEP` after each failed attempt.
///
/// Only failures whose output carries the transient connection signature are
/// retried; anything else is returned immediately.
pub async fn with_retry<F, Fut>(mut attempt_fn: F) -> Result<String>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let mut attempt = 1;
    loop {
        match attempt_fn(attempt).await {
            Ok(out) => return Ok(out),
            Err(err) => {
                let transient = matches!(
                    &err,
                    Error::CommandFailed { output, .. } if output.contains(TRANSIENT_SIGNATURE)
                );
                if !transient || attempt >= CLONE_ATTEMPTS {
                    return Err(err);
                }
                debug!(attempt, "transient clone failure, backing off");
                tokio::time::sleep(CLONE_RETRY_STEP * attempt as u32).await;
                attempt += 1;
            }
        }
    }
}

/// Returns the commit hash the checkout at `dir` points to.
pub async fn head_commit(dir: &Path) -> Result<String> {
    run("git", &["rev-parse", "HEAD"], Some(dir)).await
}

/// Packages the checkout at `dir` into the archive `out`, with every path
/// rooted under `<name>/`, selecting `version` as the tree to package.
pub async fn archive(name: &str, version: &str, out: &Path, dir: &Path) -> Result<String> {
    let prefix = format!("--prefix={name}/");
    let output = format!("--output={}", out.display());
    run("git", &["archive", &prefix, &output, version], Some(dir)).await
}

/// Unpacks `archive` into `dest`.
pub async fn extract(archive: &Path, dest: &Path) -> Result<String> {
    let archive = archive.to_string_lossy();
    run("tar", &["-xf", &archive], Some(dest)).await
}
