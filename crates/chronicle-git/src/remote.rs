//! Remote operations

use tracing::debug;

use crate::repository::{GitRepo, Result};
use chronicle_core::error::GitError;

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Browsable repository URL derived from a remote, if it has one
    pub fn repository_url(&self, remote: &str) -> Result<Option<String>> {
        let url = match self.remote_url(remote) {
            Ok(url) => url,
            Err(GitError::RemoteNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let normalized = url.as_deref().map(normalize_remote_url);
        debug!(remote, url = ?normalized, "derived repository url");
        Ok(normalized)
    }
}

/// Turn a clone URL into a browsable `https://` URL.
///
/// `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://user@host/owner/repo.git` all become `https://host/owner/repo`.
/// Anything else is returned trimmed, without a `.git` suffix.
pub fn normalize_remote_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_suffix('/').unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);

    if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = strip_userinfo(rest);
        // ssh://host:port/path keeps no port in the browsable form
        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = host.split(':').next().unwrap_or(host);
        return format!("https://{}/{}", host, path);
    }

    for scheme in ["https://", "http://"] {
        if let Some(rest) = url.strip_prefix(scheme) {
            return format!("{}{}", scheme, strip_userinfo(rest));
        }
    }

    // scp-like syntax: [user@]host:path
    if !url.contains("://") {
        if let Some((host, path)) = strip_userinfo(url).split_once(':') {
            return format!("https://{}/{}", host, path.trim_start_matches('/'));
        }
    }

    url.to_string()
}

fn strip_userinfo(rest: &str) -> &str {
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    }
}
