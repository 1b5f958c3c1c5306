//! Shared command context for CLI commands
//!
//! Extracts the setup shared by the develop and release commands.

use devrel::artifacts::{Artifact, discover_artifacts};
use devrel::auth::get_github_auth;
use devrel::config::Config;
use devrel::error::Result;
use devrel::platform::{GitHubService, PlatformService, parse_repo_info};
use devrel::repo::GitMirror;
use std::path::Path;
use tracing::debug;

/// Shared context for CLI commands that interact with GitHub
///
/// Everything that can fail locally (token, config, artifacts, repository)
/// is checked here, so a command never reaches the network with an
/// incomplete setup.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Local clone, not yet synced
    pub mirror: GitMirror,
    /// Platform service for the target repository
    pub platform: Box<dyn PlatformService>,
    /// Files to upload, installer first
    pub artifacts: Vec<Artifact>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Setup order:
    /// - Read the token from the environment
    /// - Load configuration
    /// - Discover the build artifacts
    /// - Open the repository
    /// - Resolve `owner/repo` from config or the remote URL
    pub fn new(path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let auth = get_github_auth()?;
        debug!(source = ?auth.source, "resolved GitHub token");
        let config = Config::load(config_path, path)?;

        let artifact_dir = path.join(&config.artifact_dir);
        let artifacts = discover_artifacts(
            &artifact_dir,
            &[config.installer_glob.as_str(), config.archive_glob.as_str()],
        )?;

        let mirror = GitMirror::open(path, &config.remote)?;
        debug!(root = %mirror.root().display(), "opened mirror");

        let platform_config = match config.platform_config()? {
            Some(platform_config) => platform_config,
            None => {
                let mut detected = parse_repo_info(&mirror.remote_url()?)?;
                if config.api_url.is_some() {
                    detected.api_url.clone_from(&config.api_url);
                }
                detected
            }
        };
        debug!(
            owner = %platform_config.owner,
            repo = %platform_config.repo,
            "resolved repository"
        );

        let platform = GitHubService::new(
            &auth.token,
            platform_config.owner,
            platform_config.repo,
            platform_config.api_url,
        )?;

        Ok(Self {
            config,
            mirror,
            platform: Box::new(platform),
            artifacts,
        })
    }

    /// `owner/repo` of the target repository
    pub fn repository(&self) -> String {
        let config = self.platform.config();
        format!("{}/{}", config.owner, config.repo)
    }
}
