//! Platform services for GitHub
//!
//! Provides the remote operations the release flows need: reading merged
//! pull requests and releases, and mutating a release and its assets.

mod detection;
mod github;

pub use detection::parse_repo_info;
pub use github::{GitHubService, upload_endpoint};

use crate::error::Result;
use crate::types::{AssetUpload, ChangePage, NewRelease, PlatformConfig, Release, ReleaseSummary};
use async_trait::async_trait;

/// Number of items requested per page
pub const PAGE_SIZE: u8 = 100;

/// Platform service trait for release operations
///
/// Read operations fail with `Error::Fetch`, mutations with `Error::Publish`.
/// Every call is awaited before the next is issued; implementations are not
/// expected to tolerate concurrent mutation of the same release.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List one page (1-based) of closed PRs, most recently updated first
    ///
    /// With `base`, only PRs targeting that branch are listed.
    async fn list_closed_changes(&self, base: Option<&str>, page: u32) -> Result<ChangePage>;

    /// List releases, newest first
    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>>;

    /// Get a release by its tag
    async fn get_release_by_tag(&self, tag: &str) -> Result<Release>;

    /// Create a new release
    async fn create_release(&self, release: &NewRelease) -> Result<Release>;

    /// Overwrite the description of a release
    async fn update_release_body(&self, release_id: u64, body: &str) -> Result<()>;

    /// Delete a release asset
    ///
    /// Returns only once the platform has confirmed the deletion.
    async fn delete_asset(&self, asset_id: u64) -> Result<()>;

    /// Upload an asset through the release's upload endpoint template
    async fn upload_asset(&self, upload_url: &str, upload: &AssetUpload) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
