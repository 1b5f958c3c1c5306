//! Repository detection from git remote URLs

use crate::error::{Error, Result};
use crate::types::PlatformConfig;

/// Parse `owner/repo` (and the API base for GitHub Enterprise) from a remote URL
///
/// Accepts `https://host/owner/repo(.git)`, `ssh://git@host/owner/repo(.git)`
/// and scp-like `git@host:owner/repo(.git)` forms.
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let (host, path) = split_host_path(url.trim())
        .ok_or_else(|| Error::Config(format!("unrecognized remote URL: {url}")))?;

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let (owner, repo) = path
        .split_once('/')
        .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
        .ok_or_else(|| Error::Config(format!("remote URL has no owner/repo path: {url}")))?;

    let api_url = if host == "github.com" {
        None
    } else {
        Some(format!("https://{host}/api/v3"))
    };

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        api_url,
    })
}

fn split_host_path(url: &str) -> Option<(&str, &str)> {
    if let Some((_, rest)) = url.split_once("://") {
        let (authority, path) = rest.split_once('/')?;
        // Drop userinfo and port
        let host = authority.rsplit('@').next()?;
        let host = host.split(':').next()?;
        return Some((host, path));
    }

    // scp-like: [user@]host:path
    let (authority, path) = url.split_once(':')?;
    let host = authority.rsplit('@').next()?;
    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }
    Some((host, path))
}
