//! Configuration loading
//!
//! Lookup order: an explicit `--config` path, then `devrel.toml` at the
//! repository root, then `<config dir>/devrel/config.toml`. The first file
//! found wins; with none, built-in defaults apply.

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename looked up at the repository root
pub const REPO_CONFIG_FILE: &str = "devrel.toml";

/// devrel configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `owner/name`; detected from the remote URL when unset
    pub repository: Option<String>,
    /// API base URL for GitHub Enterprise (None for api.github.com)
    pub api_url: Option<String>,
    /// Remote to fetch branches from
    pub remote: String,
    /// Branch that collects merged PRs
    pub integration_branch: String,
    /// Branch that stable releases are cut from
    pub stable_branch: String,
    /// Base branch filter for dated-release PRs (every base when unset)
    pub release_branch: Option<String>,
    /// Tag of the rolling pre-release
    pub rolling_tag: String,
    /// Directory holding the built artifacts
    pub artifact_dir: PathBuf,
    /// Glob for the platform installer archive (uploaded first)
    pub installer_glob: String,
    /// Glob for the generic archive (uploaded second)
    pub archive_glob: String,
    /// Login prefix of the automated dependency-update author
    pub bot_author_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: None,
            api_url: None,
            remote: "origin".to_string(),
            integration_branch: "develop".to_string(),
            stable_branch: "main".to_string(),
            release_branch: None,
            rolling_tag: "develop".to_string(),
            artifact_dir: PathBuf::from("droid-binary/target"),
            installer_glob: "droid-binary-*-bin-win64-with-jre.zip".to_string(),
            archive_glob: "droid-binary-*-bin.zip".to_string(),
            bot_author_prefix: "dependabot".to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid config: {e}")))
    }

    /// Load configuration for the repository at `repo_root`
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        let candidates = [
            Some(repo_root.join(REPO_CONFIG_FILE)),
            dirs::config_dir().map(|d| d.join("devrel").join("config.toml")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::load_file(&path);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Platform config from the `repository` key, if set
    pub fn platform_config(&self) -> Result<Option<PlatformConfig>> {
        let Some(ref repository) = self.repository else {
            return Ok(None);
        };

        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
            .ok_or_else(|| {
                Error::Config(format!(
                    "repository must be in owner/name form, got '{repository}'"
                ))
            })?;

        Ok(Some(PlatformConfig {
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_url: self.api_url.clone(),
        }))
    }
}
