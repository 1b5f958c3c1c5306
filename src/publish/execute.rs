//! Publish execution - effectful operations
//!
//! Takes a `PublishPlan` and reconciles the remote release to it, strictly
//! in order: resolve target, update notes, purge assets, upload assets.
//! There is no rollback; the report records the state actually reached.

use crate::error::Error;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::publish::plan::{PublishPlan, ReleaseTarget, UploadPolicy};
use crate::types::{AssetUpload, Release};
use tracing::warn;

/// Remote release state reached by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseState {
    /// Nothing resolved yet
    Absent,
    /// Release located (or created, with its body)
    Resolved,
    /// Description overwritten
    NotesUpdated,
    /// Every previously attached asset deleted
    AssetsPurged,
    /// Upload step finished
    AssetsUploaded,
}

impl std::fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Resolved => write!(f, "resolved"),
            Self::NotesUpdated => write!(f, "notes updated"),
            Self::AssetsPurged => write!(f, "assets purged"),
            Self::AssetsUploaded => write!(f, "assets uploaded"),
        }
    }
}

/// A file that was not uploaded under `UploadPolicy::Lenient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUpload {
    /// File name
    pub file_name: String,
    /// Why it was skipped
    pub reason: String,
}

/// Result of publish execution
#[derive(Debug)]
pub struct PublishReport {
    /// Last state fully reached
    pub state: ReleaseState,
    /// Snapshot of the release taken when it was resolved
    pub release: Option<Release>,
    /// Assets deleted, in order
    pub deleted_assets: Vec<u64>,
    /// Files uploaded, in order
    pub uploaded: Vec<String>,
    /// Files skipped after a failed upload
    pub skipped: Vec<SkippedUpload>,
    /// Error that aborted the run, if any
    pub failure: Option<Error>,
}

impl PublishReport {
    const fn new() -> Self {
        Self {
            state: ReleaseState::Absent,
            release: None,
            deleted_assets: Vec::new(),
            uploaded: Vec::new(),
            skipped: Vec::new(),
            failure: None,
        }
    }

    fn fail(mut self, error: Error) -> Self {
        self.failure = Some(error);
        self
    }

    /// Check if every step completed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Turn an aborted run into its error
    pub fn into_result(mut self) -> crate::error::Result<Self> {
        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

/// Execute the publish plan (EFFECTFUL)
///
/// Each remote call is awaited before the next is issued. Any failure in
/// resolving, updating notes or purging stops the run immediately, leaving
/// earlier steps applied. Upload failures follow `plan.upload_policy`.
pub async fn execute_publish(
    plan: &PublishPlan,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> PublishReport {
    let mut report = PublishReport::new();

    let resolved = match &plan.target {
        ReleaseTarget::Existing { tag } => {
            progress
                .on_message(&format!("🔍 Locating release {tag}..."))
                .await;
            platform.get_release_by_tag(tag).await
        }
        ReleaseTarget::Create(new_release) => {
            progress
                .on_message(&format!(
                    "📦 Creating GitHub release for {}...",
                    new_release.tag_name
                ))
                .await;
            platform.create_release(new_release).await
        }
    };
    let release = match resolved {
        Ok(release) => release,
        Err(e) => return report.fail(e),
    };
    report.state = ReleaseState::Resolved;
    report.release = Some(release.clone());

    if let Some(ref notes) = plan.notes {
        progress.on_message("📝 Updating release notes...").await;
        if let Err(e) = platform.update_release_body(release.id, notes).await {
            return report.fail(e);
        }
        report.state = ReleaseState::NotesUpdated;
    }

    if plan.purge_assets {
        progress.on_message("🗑️ Deleting existing assets...").await;
        for asset in &release.assets {
            if let Err(e) = platform.delete_asset(asset.id).await {
                return report.fail(e);
            }
            report.deleted_assets.push(asset.id);
            progress
                .on_message(&format!("🗑️  Deleted asset {} ({})", asset.id, asset.name))
                .await;
        }
        report.state = ReleaseState::AssetsPurged;
    }

    progress.on_message("⬆️ Uploading new assets...").await;
    for artifact in &plan.artifacts {
        progress
            .on_message(&format!("⬆️  Uploading {}...", artifact.file_name))
            .await;

        let bytes = match tokio::fs::read(&artifact.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = Error::Artifact(format!(
                    "file not found: {} ({e})",
                    artifact.path.display()
                ));
                match plan.upload_policy {
                    UploadPolicy::Strict => return report.fail(error),
                    UploadPolicy::Lenient => {
                        warn!(file = %artifact.file_name, error = %error, "skipping upload");
                        progress.on_message(&format!("⚠️  {error}")).await;
                        report.skipped.push(SkippedUpload {
                            file_name: artifact.file_name.clone(),
                            reason: error.to_string(),
                        });
                        continue;
                    }
                }
            }
        };

        let upload = AssetUpload {
            file_name: artifact.file_name.clone(),
            content_type: plan.content_type.clone(),
            bytes,
        };

        match platform.upload_asset(&release.upload_url, &upload).await {
            Ok(()) => {
                progress
                    .on_message(&format!("✅ Uploaded {}", artifact.file_name))
                    .await;
                report.uploaded.push(artifact.file_name.clone());
            }
            Err(e) => match plan.upload_policy {
                UploadPolicy::Strict => return report.fail(e),
                UploadPolicy::Lenient => {
                    warn!(file = %artifact.file_name, error = %e, "upload failed, skipping");
                    progress
                        .on_message(&format!("⚠️  Failed to upload {}: {e}", artifact.file_name))
                        .await;
                    report.skipped.push(SkippedUpload {
                        file_name: artifact.file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            },
        }
    }
    report.state = ReleaseState::AssetsUploaded;

    report
}
