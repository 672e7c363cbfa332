//! Git-backed revision resolution.
//!
//! Queries run against throwaway scratch clones: one `git init --template=`
//! repository per remote URL, living in a temp directory owned by the
//! resolver. Fetches are partial (`--filter=tree:0`) so resolving a pin
//! never downloads file content, only commit and tag metadata.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::TempDir;
use tracing::debug;

use super::{QueryCache, RemoteResolver, ResolutionError};

/// `GIT_*` variables kept when spawning git. Everything else in that
/// namespace is scrubbed so repository state from the calling environment
/// (index files, object directories, in-progress rebases) cannot leak into
/// the scratch clones. Connection and authentication settings stay.
const KEPT_GIT_VARS: &[&str] = &[
    "GIT_EXEC_PATH",
    "GIT_SSH",
    "GIT_SSH_COMMAND",
    "GIT_SSL_CAINFO",
    "GIT_SSL_NO_VERIFY",
    "GIT_CONFIG_COUNT",
    "GIT_HTTP_PROXY_AUTHMETHOD",
    "GIT_ALLOW_PROTOCOL",
    "GIT_ASKPASS",
];

const KEPT_GIT_PREFIXES: &[&str] = &["GIT_CONFIG_KEY_", "GIT_CONFIG_VALUE_"];

/// stderr fragments `git describe` emits when no tag describes the commit.
const NO_TAG_MARKERS: &[&str] = &["No names found", "No tags can describe", "cannot describe"];

/// Resolves revision specifiers with the `git` binary.
pub struct GitResolver {
    scratch: TempDir,
    cache: QueryCache,
    prepared: RefCell<HashSet<PathBuf>>,
}

impl GitResolver {
    /// Create a resolver with a fresh scratch directory.
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self {
            scratch: TempDir::new()?,
            cache: QueryCache::new(),
            prepared: RefCell::new(HashSet::new()),
        })
    }

    /// Scratch clone location for a remote URL.
    ///
    /// Uses a hash of the URL to create a deterministic, unique path.
    fn repo_dir(&self, url: &str) -> PathBuf {
        let hash = Sha256::digest(url.as_bytes());
        let hash_str = hex::encode(&hash[..8]);
        self.scratch.path().join(hash_str)
    }

    /// Initializes the scratch clone for `url` on first use.
    fn ensure_repo(&self, url: &str) -> Result<PathBuf, ResolutionError> {
        let dir = self.repo_dir(url);
        if self.prepared.borrow().contains(&dir) {
            return Ok(dir);
        }

        // Local directory remotes must be absolute once git runs -C'd into
        // the scratch clone.
        let remote = if Path::new(url).is_dir() {
            std::fs::canonicalize(url)
                .map(|path| path.to_string_lossy().into_owned())
                .unwrap_or_else(|_| url.to_string())
        } else {
            url.to_string()
        };

        debug!("Preparing scratch clone for {}", url);
        self.git(None, &["init", "--template=", &dir.to_string_lossy()])?;
        self.git(Some(&dir), &["remote", "add", "origin", &remote])?;
        self.git(Some(&dir), &["config", "extensions.partialClone", "true"])?;
        self.git(Some(&dir), &["config", "fetch.recurseSubmodules", "false"])?;

        self.prepared.borrow_mut().insert(dir.clone());
        Ok(dir)
    }

    /// Fetches `spec` from origin into the scratch clone, leaving the
    /// result at FETCH_HEAD.
    fn fetch(&self, dir: &Path, spec: &str) -> Result<(), ResolutionError> {
        debug!("Fetching {}", spec);
        self.git(
            Some(dir),
            &["fetch", "origin", spec, "--quiet", "--filter=tree:0", "--tags"],
        )?;
        Ok(())
    }

    /// Runs one git command with a scrubbed environment and returns stdout.
    fn git(&self, dir: Option<&Path>, args: &[&str]) -> Result<String, ResolutionError> {
        let command = format!("git {}", args.join(" "));

        let mut cmd = std::process::Command::new("git");
        cmd.args(["-c", "core.useBuiltinFSMonitor=false"]);
        if let Some(dir) = dir {
            cmd.arg("-C").arg(dir);
        }
        cmd.args(args);
        cmd.env_clear();
        cmd.envs(scrubbed_env());

        let output = cmd.output().map_err(|source| ResolutionError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ResolutionError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RemoteResolver for GitResolver {
    fn resolve_to_commit(&self, url: &str, spec: &str) -> Result<String, ResolutionError> {
        if let Some(commit) = self.cache.commit(url, spec) {
            return Ok(commit);
        }

        let dir = self.ensure_repo(url)?;
        self.fetch(&dir, spec)?;
        let output = self.git(Some(&dir), &["rev-parse", "FETCH_HEAD"])?;

        let commit = output.trim().to_string();
        if commit.len() != 40 || !commit.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ResolutionError::Output {
                command: "git rev-parse FETCH_HEAD".to_string(),
                output: commit,
            });
        }

        self.cache.store_commit(url, spec, commit.clone());
        Ok(commit)
    }

    fn tags_near(&self, url: &str, spec: &str) -> Result<Vec<String>, ResolutionError> {
        if let Some(tags) = self.cache.tags(url, spec) {
            return Ok(tags);
        }

        let dir = self.ensure_repo(url)?;
        self.fetch(&dir, spec)?;

        let described = match self.git(Some(&dir), &["describe", "FETCH_HEAD", "--abbrev=0", "--tags"]) {
            Ok(output) => output.trim().to_string(),
            Err(ResolutionError::Command { stderr, .. }) if describes_no_tags(&stderr) => {
                self.cache.store_tags(url, spec, Vec::new());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };
        if described.is_empty() {
            self.cache.store_tags(url, spec, Vec::new());
            return Ok(Vec::new());
        }

        let listing = self.git(
            Some(&dir),
            &["tag", "--points-at", &format!("refs/tags/{described}")],
        )?;
        let tags: Vec<String> = listing.lines().map(str::to_string).collect();

        self.cache.store_tags(url, spec, tags.clone());
        Ok(tags)
    }
}

fn describes_no_tags(stderr: &str) -> bool {
    NO_TAG_MARKERS.iter().any(|marker| stderr.contains(marker))
}

fn scrubbed_env() -> Vec<(String, String)> {
    std::env::vars()
        .filter(|(key, _)| {
            !key.starts_with("GIT_")
                || KEPT_GIT_VARS.contains(&key.as_str())
                || KEPT_GIT_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
        })
        .collect()
}
