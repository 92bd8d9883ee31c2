//! Remote tag queries for the version-update pass.

use crate::error::{Error, Result};
use crate::repo::normalize_src;
use crate::run::run;

/// Token marking a tag ref in `git ls-remote` output.
const TAGS_PREFIX: &str = "refs/tags/";

/// Queries `src` for its tags and returns the highest one by descending
/// version order, or `None` when the remote has no tags at all.
pub async fn latest_remote_tag(src: &str) -> Result<Option<String>> {
    let repo = normalize_src(src);
    let tags = run(
        "git",
        &["ls-remote", "-tq", "--sort=-version:refname", repo],
        None,
    )
    .await?;
    if tags.is_empty() {
        return Ok(None);
    }
    parse_latest_tag(&tags).map(Some)
}

/// Extracts the tag name from the first line of `git ls-remote` output.
///
/// Annotated tags on some hosts come back with a `^{}` dereference suffix,
/// which is stripped. A first line without a `refs/tags/` token is a
/// malformed response, not a silent skip.
pub fn parse_latest_tag(output: &str) -> Result<String> {
    let line = output.lines().next().unwrap_or_default();
    let idx = line.find(TAGS_PREFIX).ok_or_else(|| Error::MalformedTagListing {
        line: line.to_string(),
    })?;
    let tag = line[idx + TAGS_PREFIX.len()..].trim_end_matches("^{}");
    Ok(tag.to_string())
}
