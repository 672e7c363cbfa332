//! Mock resolver for testing.
//!
//! [`MockResolver`] answers revision queries from canned tables instead of
//! spawning git, and records every call so tests can assert on lookup
//! traffic.
//!
//! # Example
//!
//! ```
//! use frostline::git::{MockResolver, RemoteResolver};
//!
//! let resolver = MockResolver::new()
//!     .with_commit("https://example.com/repo", "main", &"a".repeat(40))
//!     .with_tags("https://example.com/repo", "main", &["v1.0.0"]);
//!
//! let commit = resolver.resolve_to_commit("https://example.com/repo", "main").unwrap();
//! assert_eq!(commit.len(), 40);
//! assert!(resolver.resolve_to_commit("https://example.com/repo", "gone").is_err());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use super::{RemoteResolver, ResolutionError};

/// A resolver answering from fixed tables.
#[derive(Debug, Default)]
pub struct MockResolver {
    commits: HashMap<(String, String), String>,
    tags: HashMap<(String, String), Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the commit hash `spec` resolves to at `url`.
    pub fn with_commit(mut self, url: &str, spec: &str, commit: &str) -> Self {
        self.commits
            .insert((url.to_string(), spec.to_string()), commit.to_string());
        self
    }

    /// Registers the tags found near `spec` at `url`.
    pub fn with_tags(mut self, url: &str, spec: &str, tags: &[&str]) -> Self {
        self.tags.insert(
            (url.to_string(), spec.to_string()),
            tags.iter().map(|tag| tag.to_string()).collect(),
        );
        self
    }

    /// Every query made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn unreachable_remote(spec: &str) -> ResolutionError {
        ResolutionError::Command {
            command: format!("git fetch origin {spec}"),
            stderr: "couldn't find remote ref".to_string(),
        }
    }
}

impl RemoteResolver for MockResolver {
    fn resolve_to_commit(&self, url: &str, spec: &str) -> Result<String, ResolutionError> {
        self.calls.borrow_mut().push(format!("resolve {url} {spec}"));
        self.commits
            .get(&(url.to_string(), spec.to_string()))
            .cloned()
            .ok_or_else(|| Self::unreachable_remote(spec))
    }

    fn tags_near(&self, url: &str, spec: &str) -> Result<Vec<String>, ResolutionError> {
        self.calls.borrow_mut().push(format!("tags {url} {spec}"));
        self.tags
            .get(&(url.to_string(), spec.to_string()))
            .cloned()
            .ok_or_else(|| Self::unreachable_remote(spec))
    }
}
