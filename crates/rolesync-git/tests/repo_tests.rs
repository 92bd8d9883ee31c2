use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use rolesync_git::repo::{CLONE_ATTEMPTS, with_retry};
use rolesync_git::{Error, is_commit_hash, normalize_src};

#[test]
fn normalize_strips_scheme_decoration() {
    assert_eq!(
        normalize_src("git+https://github.com/acme/a.git"),
        "https://github.com/acme/a.git"
    );
    assert_eq!(
        normalize_src("https://github.com/acme/a.git"),
        "https://github.com/acme/a.git"
    );
}

#[test]
fn commit_hashes_are_forty_hex_chars() {
    assert!(is_commit_hash("0123456789abcdef0123456789abcdef01234567"));
    assert!(!is_commit_hash("v1.0.0"));
    assert!(!is_commit_hash("0123456789abcdef0123456789abcdef0123456")); // 39
    assert!(!is_commit_hash("g123456789abcdef0123456789abcdef01234567")); // non-hex
}

fn transient_failure() -> Error {
    Error::CommandFailed {
        program: "git".to_string(),
        output: "fatal: unable to access 'https://github.com/acme/a.git/': \
                 Failed to connect to github.com port 443: Couldn't connect to server"
            .to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn retries_transient_failures_exactly_five_times() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let result = with_retry(move |_attempt| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(transient_failure())
        }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), CLONE_ATTEMPTS);
}

#[tokio::test]
async fn permanent_failures_are_not_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let result = with_retry(move |_attempt| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Error::CommandFailed {
                program: "git".to_string(),
                output: "fatal: Remote branch v9.9.9 not found".to_string(),
            })
        }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn recovers_after_transient_failures() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let result = with_retry(move |_attempt| {
        let counter = Arc::clone(&counter);
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(transient_failure())
            } else {
                Ok("cloned".to_string())
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "cloned");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}
