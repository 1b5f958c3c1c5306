//! Command flows
//!
//! The full develop and release runs, from fetching merged PRs to publishing.
//! Local setup (token, config, artifacts, mirror sync) happens before either
//! flow is entered, so by the time a flow runs every input is in hand.

use crate::artifacts::Artifact;
use crate::changes::{FetchOptions, fetch_merged};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notes::render;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::publish::{PublishPlan, PublishReport, create_publish_plan, execute_publish};
use crate::repo::AncestryOracle;
use crate::resolve::{release_cutoff, resolve_pending, resolve_since};
use crate::types::{Mode, Release};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Inputs shared by both flows
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Timestamp rendered into promotion-mode notes
    pub now: DateTime<Utc>,
    /// Stop after planning; only read calls are made
    pub dry_run: bool,
}

/// How a flow ended
#[derive(Debug)]
pub enum RunOutcome {
    /// Every merged PR is already on the stable branch; nothing was published
    NothingPending,
    /// Dry run: the plan that would be executed
    Planned {
        plan: PublishPlan,
        /// Current rolling release, looked up for the preview (develop only)
        existing: Option<Release>,
    },
    /// The plan was executed; the report may carry a failure
    Published(PublishReport),
}

/// Trimmed release version, rejecting a blank one
pub fn release_version(version: &str) -> Result<&str> {
    let version = version.trim();
    if version.is_empty() {
        return Err(Error::Config("release version must not be empty".to_string()));
    }
    Ok(version)
}

/// Reconcile the rolling pre-release with the PRs not yet on the stable branch
///
/// `oracle` must already be synced with the remote. When nothing is pending
/// the flow returns before any further platform call.
pub async fn reconcile_develop(
    platform: &dyn PlatformService,
    oracle: &dyn AncestryOracle,
    config: &Config,
    artifacts: &[Artifact],
    options: RunOptions,
    progress: &dyn ProgressCallback,
) -> Result<RunOutcome> {
    let integration = config.integration_branch.as_str();
    let stable = config.stable_branch.as_str();
    let stable_tip = oracle.tip_of(stable)?;
    debug!(branch = stable, tip = %stable_tip, "stable tip");

    progress
        .on_message(&format!("🔍 Fetching merged PRs into {integration}..."))
        .await;
    let merged = fetch_merged(platform, Some(integration), FetchOptions::default()).await?;

    let pending = resolve_pending(merged, oracle, &stable_tip);
    if pending.is_empty() {
        info!("no pending changes, release left untouched");
        return Ok(RunOutcome::NothingPending);
    }
    progress
        .on_message(&format!(
            "{} PR(s) in {integration} not yet in {stable}",
            pending.len()
        ))
        .await;

    let notes = render(&pending, Mode::Promotion, stable, options.now);
    let plan = create_publish_plan(
        Mode::Promotion,
        &config.rolling_tag,
        notes,
        artifacts.to_vec(),
    );

    if options.dry_run {
        let existing = platform.get_release_by_tag(&config.rolling_tag).await?;
        return Ok(RunOutcome::Planned {
            plan,
            existing: Some(existing),
        });
    }

    Ok(RunOutcome::Published(
        execute_publish(&plan, platform, progress).await,
    ))
}

/// Cut release `version` listing every PR merged since the previous release
pub async fn cut_release(
    platform: &dyn PlatformService,
    config: &Config,
    version: &str,
    artifacts: &[Artifact],
    options: RunOptions,
    progress: &dyn ProgressCallback,
) -> Result<RunOutcome> {
    let version = release_version(version)?;

    progress.on_message("🔍 Fetching existing releases...").await;
    let releases = platform.list_releases().await?;
    let cutoff = release_cutoff(&releases, version, &config.rolling_tag);
    progress
        .on_message(&format!("Last release date: {}", cutoff.to_rfc3339()))
        .await;

    progress.on_message("🔍 Fetching merged pull requests...").await;
    let merged = fetch_merged(
        platform,
        config.release_branch.as_deref(),
        FetchOptions {
            since: Some(cutoff),
            exclude_author_prefix: Some(&config.bot_author_prefix),
        },
    )
    .await?;

    let selected = resolve_since(merged, cutoff, &config.bot_author_prefix);
    progress
        .on_message(&format!(
            "{} PR(s) merged since last release",
            selected.len()
        ))
        .await;

    let notes = render(&selected, Mode::Cutoff, &config.stable_branch, options.now);
    let plan = create_publish_plan(Mode::Cutoff, version, notes, artifacts.to_vec());

    if options.dry_run {
        return Ok(RunOutcome::Planned {
            plan,
            existing: None,
        });
    }

    Ok(RunOutcome::Published(
        execute_publish(&plan, platform, progress).await,
    ))
}
