//! Core types for devrel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier naming a point in history (a git object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commit(String);

impl Commit {
    /// Wrap a commit identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Commit {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A closed pull request as listed by the platform, merged or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedChange {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author login
    pub author: String,
    /// Merge commit, if the platform recorded one
    pub merge_commit: Option<Commit>,
    /// When the PR was merged (None if closed without merging)
    pub merged_at: Option<DateTime<Utc>>,
    /// Last update time, the sort key of the listing
    pub updated_at: DateTime<Utc>,
}

impl ClosedChange {
    /// Convert into a `MergedChange`, dropping PRs closed without merging
    pub fn into_merged(self) -> Option<MergedChange> {
        let merged_at = self.merged_at?;
        Some(MergedChange {
            number: self.number,
            title: self.title,
            author: self.author,
            merge_commit: self.merge_commit,
            merged_at,
        })
    }
}

/// One page of closed PRs
#[derive(Debug, Clone, Default)]
pub struct ChangePage {
    /// PRs on this page, most recently updated first
    pub changes: Vec<ClosedChange>,
    /// Whether the platform advertised a following page
    pub has_next: bool,
}

/// A merged pull request
///
/// Immutable once fetched; `number` is unique within one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedChange {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author login
    pub author: String,
    /// Merge commit (None when the platform has not recorded it yet)
    pub merge_commit: Option<Commit>,
    /// When the PR was merged
    pub merged_at: DateTime<Utc>,
}

/// An asset attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID
    pub id: u64,
    /// File name shown on the release page
    pub name: String,
}

/// Snapshot of a remote release
///
/// Taken once at the start of a run; no concurrency check is made against
/// later changes to the remote copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Tag name
    pub tag: String,
    /// Description (markdown body)
    pub body: String,
    /// Web URL for the release
    pub html_url: String,
    /// Upload endpoint template (`.../assets{?name,label}`)
    pub upload_url: String,
    /// Attached assets, in platform order
    pub assets: Vec<Asset>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

/// Minimal release listing entry, used to derive the cutoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Tag name
    pub tag: String,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag to create the release for
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Description
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as pre-release
    pub prerelease: bool,
}

/// Bytes to upload as a release asset
#[derive(Debug, Clone)]
pub struct AssetUpload {
    /// File name, sent as the `name` query parameter
    pub file_name: String,
    /// Content type header
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Which of the two release flows is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Rolling develop pre-release: list changes not yet on the stable branch
    Promotion,
    /// Dated release: list changes merged since the previous release
    Cutoff,
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom API base URL (None for api.github.com)
    pub api_url: Option<String>,
}
