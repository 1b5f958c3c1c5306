//! Publish planning - pure functions for creating publish plans
//!
//! No I/O happens here; the plan fixes the step order and per-mode policy
//! before anything remote is touched.

use crate::artifacts::Artifact;
use crate::types::{Mode, NewRelease, Release};

/// Content type for assets of the rolling pre-release
pub const PROMOTION_CONTENT_TYPE: &str = "application/zip";

/// Content type for assets of a dated release
pub const CUTOFF_CONTENT_TYPE: &str = "application/octet-stream";

/// How the release to publish to is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// Look up an existing release by tag
    Existing {
        /// Tag of the release
        tag: String,
    },
    /// Create a new release (its body is set at creation)
    Create(NewRelease),
}

impl ReleaseTarget {
    /// Tag of the target release
    pub fn tag(&self) -> &str {
        match self {
            Self::Existing { tag } => tag,
            Self::Create(release) => &release.tag_name,
        }
    }
}

/// What a failed upload does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPolicy {
    /// Abort the run (the rolling pre-release favours consistency)
    Strict,
    /// Log, skip the file and continue (a dated release favours getting out)
    Lenient,
}

/// Publish plan - the functional core output
#[derive(Debug, Clone)]
pub struct PublishPlan {
    /// Release to reconcile
    pub target: ReleaseTarget,
    /// New description, if it must be overwritten after resolving
    pub notes: Option<String>,
    /// Whether every attached asset is deleted before uploading
    pub purge_assets: bool,
    /// Files to upload, in upload order
    pub artifacts: Vec<Artifact>,
    /// Content type sent with every upload
    pub content_type: String,
    /// Failure handling for uploads
    pub upload_policy: UploadPolicy,
}

/// A single step, for previews
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStep {
    /// Look up the release by tag
    LocateRelease(String),
    /// Create the release
    CreateRelease(String),
    /// Overwrite the release notes
    UpdateNotes,
    /// Delete an attached asset
    DeleteAsset {
        /// Asset ID
        id: u64,
        /// Asset file name
        name: String,
    },
    /// Upload a local file
    UploadAsset(String),
}

impl std::fmt::Display for PublishStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocateRelease(tag) => write!(f, "locate release '{tag}'"),
            Self::CreateRelease(tag) => write!(f, "create release '{tag}'"),
            Self::UpdateNotes => write!(f, "update release notes"),
            Self::DeleteAsset { id, name } => write!(f, "delete asset {id} ({name})"),
            Self::UploadAsset(name) => write!(f, "upload {name}"),
        }
    }
}

impl PublishPlan {
    /// Steps this plan will perform against `existing` (the current snapshot
    /// of the target release, when known)
    pub fn steps(&self, existing: Option<&Release>) -> Vec<PublishStep> {
        let mut steps = vec![match &self.target {
            ReleaseTarget::Existing { tag } => PublishStep::LocateRelease(tag.clone()),
            ReleaseTarget::Create(release) => PublishStep::CreateRelease(release.tag_name.clone()),
        }];

        if self.notes.is_some() {
            steps.push(PublishStep::UpdateNotes);
        }
        if self.purge_assets
            && let Some(release) = existing
        {
            steps.extend(release.assets.iter().map(|a| PublishStep::DeleteAsset {
                id: a.id,
                name: a.name.clone(),
            }));
        }
        steps.extend(
            self.artifacts
                .iter()
                .map(|a| PublishStep::UploadAsset(a.file_name.clone())),
        );
        steps
    }
}

/// Create a publish plan (PURE - no I/O, easily testable)
///
/// Promotion mode updates the existing release `tag`, purges its assets and
/// uploads strictly. Cutoff mode creates release `tag` named
/// `Release <tag>` with `notes` as its body and uploads leniently.
#[must_use]
pub fn create_publish_plan(
    mode: Mode,
    tag: &str,
    notes: String,
    artifacts: Vec<Artifact>,
) -> PublishPlan {
    match mode {
        Mode::Promotion => PublishPlan {
            target: ReleaseTarget::Existing {
                tag: tag.to_string(),
            },
            notes: Some(notes),
            purge_assets: true,
            artifacts,
            content_type: PROMOTION_CONTENT_TYPE.to_string(),
            upload_policy: UploadPolicy::Strict,
        },
        Mode::Cutoff => PublishPlan {
            target: ReleaseTarget::Create(NewRelease {
                tag_name: tag.to_string(),
                name: format!("Release {tag}"),
                body: notes,
                draft: false,
                prerelease: false,
            }),
            notes: None,
            purge_assets: false,
            artifacts,
            content_type: CUTOFF_CONTENT_TYPE.to_string(),
            upload_policy: UploadPolicy::Lenient,
        },
    }
}
