//! Extraction of an `owner/repo` slug from a git remote URL.
//!
//! Buildkite exposes the checkout remote verbatim, so the URL may use any of
//! the common git transports:
//!
//! ```text
//! https://github.com/owner/repo.git
//! git@github.com:owner/repo.git
//! ssh://git@github.com/owner/repo
//! ```

use crate::types::RepoId;
use thiserror::Error;

/// Errors from slug resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    /// The URL does not use a recognized git transport.
    #[error("unrecognized repository URL {url:?}")]
    UnrecognizedUrl { url: String },

    /// The URL's path does not have the two or three segments of a hosted
    /// repository (`owner/repo` or `host/owner/repo`).
    #[error("repository path {path:?} has {segments} segments, expected 2 or 3")]
    UnsupportedPathShape { path: String, segments: usize },
}

const URL_SCHEMES: &[&str] = &["https://", "http://", "ssh://", "git://"];

/// Resolves a git remote URL to its `owner/repo` slug.
///
/// The transport prefix (URL scheme, or scp-like `git@host:`) is stripped,
/// along with a trailing `/` and a trailing `.git`. What remains must be
/// either `owner/repo` (scp-like remotes) or `host/owner/repo` (full URLs);
/// any other shape is rejected rather than guessed at.
pub fn resolve_slug(url: &str) -> Result<RepoId, SlugError> {
    let path = strip_transport(url).ok_or_else(|| SlugError::UnrecognizedUrl {
        url: url.to_string(),
    })?;

    let path = path.strip_suffix('/').unwrap_or(path);
    let path = path.strip_suffix(".git").unwrap_or(path);

    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        [owner, repo] | [_, owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok(RepoId::new(*owner, *repo))
        }
        _ => Err(SlugError::UnsupportedPathShape {
            path: path.to_string(),
            segments: segments.len(),
        }),
    }
}

/// Strips the transport prefix, returning the host-and-path remainder.
///
/// For URL schemes the remainder starts with the host (so the path has three
/// segments); for scp-like `git@host:` remotes the remainder is the path
/// alone (two segments).
fn strip_transport(url: &str) -> Option<&str> {
    for scheme in URL_SCHEMES {
        if let Some(rest) = url.strip_prefix(scheme) {
            return Some(rest);
        }
    }

    let rest = url.strip_prefix("git@")?;
    let colon = rest.find(':')?;
    let host = &rest[..colon];
    if host.is_empty()
        || !host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_')
    {
        return None;
    }
    Some(&rest[colon + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    mod accepted {
        use super::*;

        #[test]
        fn https_with_git_suffix() {
            assert_eq!(
                resolve_slug("https://github.com/owner/repo.git"),
                Ok(RepoId::new("owner", "repo"))
            );
        }

        #[test]
        fn https_without_git_suffix() {
            assert_eq!(
                resolve_slug("https://github.com/owner/repo"),
                Ok(RepoId::new("owner", "repo"))
            );
        }

        #[test]
        fn https_with_trailing_slash() {
            assert_eq!(
                resolve_slug("https://github.com/owner/repo.git/"),
                Ok(RepoId::new("owner", "repo"))
            );
        }

        #[test]
        fn scp_like() {
            assert_eq!(
                resolve_slug("git@github.com:owner/repo.git"),
                Ok(RepoId::new("owner", "repo"))
            );
        }

        #[test]
        fn ssh_scheme() {
            assert_eq!(
                resolve_slug("ssh://git@github.com/owner/repo"),
                Ok(RepoId::new("owner", "repo"))
            );
        }

        #[test]
        fn git_scheme() {
            assert_eq!(
                resolve_slug("git://github.com/owner/repo.git"),
                Ok(RepoId::new("owner", "repo"))
            );
        }

        #[test]
        fn dotted_repo_name_keeps_inner_dots() {
            assert_eq!(
                resolve_slug("https://github.com/owner/repo.name.git"),
                Ok(RepoId::new("owner", "repo.name"))
            );
        }
    }

    mod rejected {
        use super::*;

        #[test]
        fn bare_path_has_no_transport() {
            assert_eq!(
                resolve_slug("owner/repo"),
                Err(SlugError::UnrecognizedUrl {
                    url: "owner/repo".to_string()
                })
            );
        }

        #[test]
        fn single_segment_path() {
            assert_eq!(
                resolve_slug("git@github.com:repo.git"),
                Err(SlugError::UnsupportedPathShape {
                    path: "repo".to_string(),
                    segments: 1
                })
            );
        }

        #[test]
        fn four_segment_path() {
            assert_eq!(
                resolve_slug("https://github.com/org/team/repo.git"),
                Err(SlugError::UnsupportedPathShape {
                    path: "github.com/org/team/repo".to_string(),
                    segments: 4
                })
            );
        }

        #[test]
        fn empty_owner_segment() {
            assert!(matches!(
                resolve_slug("https://github.com//repo"),
                Err(SlugError::UnsupportedPathShape { .. })
            ));
        }

        #[test]
        fn scp_like_with_bad_host() {
            assert!(matches!(
                resolve_slug("git@bad host:owner/repo"),
                Err(SlugError::UnrecognizedUrl { .. })
            ));
        }
    }
}
