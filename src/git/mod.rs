//! Remote revision resolution.
//!
//! Fixing a revision pin needs two questions answered about the remote
//! repository: "which commit does this specifier name?" and "which tags sit
//! at the nearest tagged commit?". The [`RemoteResolver`] trait captures
//! those two operations; [`GitResolver`] answers them with `git` against
//! throwaway partial clones, and [`mock::MockResolver`] answers them from
//! canned tables in tests.

pub mod mock;
pub mod resolver;

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

pub use mock::MockResolver;
pub use resolver::GitResolver;

/// Error raised when a remote revision query fails.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The git binary could not be spawned at all.
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A git command ran and reported failure.
    #[error("{command} failed: {stderr}")]
    Command { command: String, stderr: String },

    /// A git command succeeded but printed something unusable.
    #[error("Unexpected output from {command}: {output}")]
    Output { command: String, output: String },
}

/// Answers revision queries against a remote repository.
///
/// Both operations are idempotent for a given `(url, spec)` pair, and
/// implementations are expected to memoize successful answers for their
/// own lifetime. Failures are never cached; a retry may succeed.
pub trait RemoteResolver {
    /// Resolves `spec` (a branch, tag, or hash) in the repository at `url`
    /// to a full 40-digit commit hash.
    fn resolve_to_commit(&self, url: &str, spec: &str) -> Result<String, ResolutionError>;

    /// Lists the tag names pointing at the nearest tagged ancestor of
    /// `spec` in the repository at `url`. Returns an empty list when no
    /// tag describes the commit at all.
    fn tags_near(&self, url: &str, spec: &str) -> Result<Vec<String>, ResolutionError>;

    /// Picks the preferred tag near `spec`: the shortest dotted tag if any
    /// tag contains a `.`, otherwise the shortest tag overall. `None` when
    /// the commit has no tags.
    fn select_best_tag(&self, url: &str, spec: &str) -> Result<Option<String>, ResolutionError> {
        let tags = self.tags_near(url, spec)?;
        Ok(best_tag(&tags).map(str::to_string))
    }
}

/// Shortest-dotted-tag selection, shared by every resolver.
///
/// Dotted tags are preferred because they usually carry a full version
/// (`v1.2.0` over `v1` or `latest`). Ties break toward the earliest tag
/// in the input order.
pub fn best_tag(tags: &[String]) -> Option<&str> {
    fn first_shortest<'a>(iter: impl Iterator<Item = &'a str>) -> Option<&'a str> {
        iter.enumerate()
            .min_by_key(|(index, tag)| (tag.len(), *index))
            .map(|(_, tag)| tag)
    }

    first_shortest(tags.iter().map(String::as_str).filter(|tag| tag.contains('.')))
        .or_else(|| first_shortest(tags.iter().map(String::as_str)))
}

/// Memoized answers from one resolver, keyed by `(url, spec)`.
///
/// Only successful answers land here. The cache lives exactly as long as
/// the resolver that owns it, so one lint run never re-queries a pin and
/// two runs never share stale state.
#[derive(Debug, Default)]
pub struct QueryCache {
    commits: RefCell<HashMap<(String, String), String>>,
    tags: RefCell<HashMap<(String, String), Vec<String>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&self, url: &str, spec: &str) -> Option<String> {
        self.commits
            .borrow()
            .get(&(url.to_string(), spec.to_string()))
            .cloned()
    }

    pub fn store_commit(&self, url: &str, spec: &str, commit: String) {
        self.commits
            .borrow_mut()
            .insert((url.to_string(), spec.to_string()), commit);
    }

    pub fn tags(&self, url: &str, spec: &str) -> Option<Vec<String>> {
        self.tags
            .borrow()
            .get(&(url.to_string(), spec.to_string()))
            .cloned()
    }

    pub fn store_tags(&self, url: &str, spec: &str, tags: Vec<String>) {
        self.tags
            .borrow_mut()
            .insert((url.to_string(), spec.to_string()), tags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn best_tag_prefers_the_shortest_dotted_tag() {
        let candidates = tags(&["v1.2.0-rc1", "v1.2.0", "latest"]);
        assert_eq!(best_tag(&candidates), Some("v1.2.0"));
    }

    #[test]
    fn best_tag_falls_back_to_the_shortest_overall() {
        let candidates = tags(&["latest", "v1"]);
        assert_eq!(best_tag(&candidates), Some("v1"));
    }

    #[test]
    fn best_tag_breaks_ties_toward_the_first() {
        let candidates = tags(&["v1.0", "x1.0"]);
        assert_eq!(best_tag(&candidates), Some("v1.0"));
        let undotted = tags(&["abc", "xyz"]);
        assert_eq!(best_tag(&undotted), Some("abc"));
    }

    #[test]
    fn best_tag_of_nothing_is_none() {
        assert_eq!(best_tag(&[]), None);
    }

    #[test]
    fn cache_stores_and_returns_commits() {
        let cache = QueryCache::new();
        assert_eq!(cache.commit("url", "main"), None);
        cache.store_commit("url", "main", "abc".to_string());
        assert_eq!(cache.commit("url", "main"), Some("abc".to_string()));
        assert_eq!(cache.commit("url", "other"), None);
    }

    #[test]
    fn cache_keys_on_both_url_and_spec() {
        let cache = QueryCache::new();
        cache.store_tags("a", "main", tags(&["v1.0"]));
        assert_eq!(cache.tags("a", "main"), Some(tags(&["v1.0"])));
        assert_eq!(cache.tags("b", "main"), None);
    }
}
