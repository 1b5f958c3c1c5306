//! Ancestry oracle backed by the system `git` binary

use crate::error::{Error, Result};
use crate::repo::AncestryOracle;
use crate::types::Commit;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, warn};

/// Local clone used to answer ancestry queries
///
/// Branch tips are read from remote-tracking refs (`refs/remotes/<remote>/*`),
/// so they reflect the last `sync`, never local branches.
pub struct GitMirror {
    /// Working tree root
    root: PathBuf,
    /// Remote to fetch from
    remote: String,
    /// Whether `sync` has run in this process
    synced: bool,
}

impl GitMirror {
    /// Open the repository containing `path`
    pub fn open(path: &Path, remote: &str) -> Result<Self> {
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| Error::Sync(format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(Error::Sync(format!(
                "not a git repository: {} ({})",
                path.display(),
                stderr_of(&output)
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(root = %root, remote, "opened repository");

        Ok(Self {
            root: PathBuf::from(root),
            remote: remote.to_string(),
            synced: false,
        })
    }

    /// Working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the remote branches are fetched from
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// URL of the configured remote
    pub fn remote_url(&self) -> Result<String> {
        let output = self
            .git_cmd()
            .args(["remote", "get-url", &self.remote])
            .output()
            .map_err(|e| Error::Sync(format!("failed to execute git remote: {e}")))?;

        if !output.status.success() {
            return Err(Error::Sync(format!(
                "remote '{}' not found: {}",
                self.remote,
                stderr_of(&output)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Fetch `branches` from the remote, refreshing their remote-tracking refs
    pub fn sync(&mut self, branches: &[&str]) -> Result<()> {
        debug!(remote = %self.remote, ?branches, "fetching branches");
        let output = self
            .git_cmd()
            .args(["fetch", "--no-tags", &self.remote])
            .args(branches)
            .output()
            .map_err(|e| Error::Sync(format!("failed to execute git fetch: {e}")))?;

        if !output.status.success() {
            return Err(Error::Sync(format!(
                "git fetch {} failed: {}",
                self.remote,
                stderr_of(&output)
            )));
        }

        self.synced = true;
        debug!(remote = %self.remote, "fetched branches");
        Ok(())
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.root);
        // Never block on a credential prompt
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

impl AncestryOracle for GitMirror {
    fn tip_of(&self, branch: &str) -> Result<Commit> {
        if !self.synced {
            return Err(Error::Sync(format!(
                "refusing to resolve '{branch}' before fetching from {}",
                self.remote
            )));
        }

        let spec = format!("refs/remotes/{}/{branch}^{{commit}}", self.remote);
        let output = self
            .git_cmd()
            .args(["rev-parse", "--verify", "--quiet", &spec])
            .output()
            .map_err(|e| Error::Sync(format!("failed to execute git rev-parse: {e}")))?;

        if !output.status.success() {
            return Err(Error::Sync(format!(
                "branch '{}/{branch}' not found in local mirror",
                self.remote
            )));
        }

        let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(branch, sha = %sha, "resolved branch tip");
        Ok(Commit::new(sha))
    }

    fn is_ancestor(&self, candidate: &Commit, tip: &Commit) -> bool {
        if !is_object_id(candidate.as_str()) || !is_object_id(tip.as_str()) {
            debug!(candidate = %candidate, "malformed commit id, not an ancestor");
            return false;
        }

        // Exit 0: ancestor, 1: not an ancestor, 128: unknown commit
        match self
            .git_cmd()
            .args(["merge-base", "--is-ancestor", candidate.as_str(), tip.as_str()])
            .output()
        {
            Ok(output) => output.status.success(),
            Err(e) => {
                warn!(candidate = %candidate, error = %e, "failed to execute git merge-base");
                false
            }
        }
    }
}

/// Full or abbreviated hex object id (SHA-1 or SHA-256)
fn is_object_id(id: &str) -> bool {
    (4..=64).contains(&id.len()) && id.chars().all(|c| c.is_ascii_hexdigit())
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
