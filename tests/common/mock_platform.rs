//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use devrel::error::{Error, Result};
use devrel::platform::PlatformService;
use devrel::types::{
    Asset, AssetUpload, ChangePage, NewRelease, PlatformConfig, Release, ReleaseSummary,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `list_closed_changes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChangesCall {
    pub base: Option<String>,
    pub page: u32,
}

/// Call record for `update_release_body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBodyCall {
    pub release_id: u64,
    pub body: String,
}

/// Call record for `upload_asset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub upload_url: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// Stateful mock of a GitHub repository's PRs and releases
///
/// Mutations are applied to an in-memory release store, so a second run
/// against the same mock sees the effects of the first.
///
/// Features:
/// - Paged closed-PR listing
/// - Call tracking for verification
/// - Error injection per operation
pub struct MockPlatformService {
    config: PlatformConfig,
    next_id: AtomicU64,
    pages: Mutex<Vec<ChangePage>>,
    summaries: Mutex<Vec<ReleaseSummary>>,
    releases: Mutex<HashMap<String, Release>>,
    // Call tracking
    list_changes_calls: Mutex<Vec<ListChangesCall>>,
    list_releases_calls: Mutex<usize>,
    get_release_calls: Mutex<Vec<String>>,
    create_release_calls: Mutex<Vec<NewRelease>>,
    update_body_calls: Mutex<Vec<UpdateBodyCall>>,
    delete_asset_calls: Mutex<Vec<u64>>,
    upload_calls: Mutex<Vec<UploadCall>>,
    // Error injection
    error_on_list_changes: Mutex<Option<(u32, String)>>,
    error_on_list_releases: Mutex<Option<String>>,
    error_on_get_release: Mutex<Option<String>>,
    error_on_create_release: Mutex<Option<String>>,
    error_on_update_body: Mutex<Option<String>>,
    error_on_delete_asset: Mutex<Option<(u64, String)>>,
    error_on_upload: Mutex<Option<(String, String)>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(1000),
            pages: Mutex::new(Vec::new()),
            summaries: Mutex::new(Vec::new()),
            releases: Mutex::new(HashMap::new()),
            list_changes_calls: Mutex::new(Vec::new()),
            list_releases_calls: Mutex::new(0),
            get_release_calls: Mutex::new(Vec::new()),
            create_release_calls: Mutex::new(Vec::new()),
            update_body_calls: Mutex::new(Vec::new()),
            delete_asset_calls: Mutex::new(Vec::new()),
            upload_calls: Mutex::new(Vec::new()),
            error_on_list_changes: Mutex::new(None),
            error_on_list_releases: Mutex::new(None),
            error_on_get_release: Mutex::new(None),
            error_on_create_release: Mutex::new(None),
            error_on_update_body: Mutex::new(None),
            error_on_delete_asset: Mutex::new(None),
            error_on_upload: Mutex::new(None),
        }
    }

    // === Setup methods ===

    /// Set the pages returned by `list_closed_changes`, page 1 first
    ///
    /// Every page but the last advertises a following page.
    pub fn set_pages(&self, pages: Vec<Vec<devrel::types::ClosedChange>>) {
        let count = pages.len();
        *self.pages.lock().unwrap() = pages
            .into_iter()
            .enumerate()
            .map(|(i, changes)| ChangePage {
                changes,
                has_next: i + 1 < count,
            })
            .collect();
    }

    /// Set the listing returned by `list_releases`
    pub fn set_release_summaries(&self, summaries: Vec<ReleaseSummary>) {
        *self.summaries.lock().unwrap() = summaries;
    }

    /// Add an existing release with assets named `asset_names`
    pub fn add_release(&self, tag: &str, body: &str, asset_names: &[&str]) -> Release {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let assets = asset_names
            .iter()
            .map(|name| Asset {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                name: (*name).to_string(),
            })
            .collect();
        let release = Release {
            id,
            tag: tag.to_string(),
            body: body.to_string(),
            html_url: format!("https://github.com/test/repo/releases/tag/{tag}"),
            upload_url: format!(
                "https://uploads.github.com/repos/test/repo/releases/{id}/assets{{?name,label}}"
            ),
            assets,
            created_at: Some(Utc::now()),
        };
        self.releases
            .lock()
            .unwrap()
            .insert(tag.to_string(), release.clone());
        release
    }

    /// Current state of the release tagged `tag`
    pub fn release(&self, tag: &str) -> Option<Release> {
        self.releases.lock().unwrap().get(tag).cloned()
    }

    // === Error injection methods ===

    /// Make `list_closed_changes` fail for `page`
    pub fn fail_list_changes(&self, page: u32, msg: &str) {
        *self.error_on_list_changes.lock().unwrap() = Some((page, msg.to_string()));
    }

    /// Make `list_releases` return an error
    pub fn fail_list_releases(&self, msg: &str) {
        *self.error_on_list_releases.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_release_by_tag` return an error
    pub fn fail_get_release(&self, msg: &str) {
        *self.error_on_get_release.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_release` return an error
    pub fn fail_create_release(&self, msg: &str) {
        *self.error_on_create_release.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_release_body` return an error
    pub fn fail_update_body(&self, msg: &str) {
        *self.error_on_update_body.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `delete_asset` fail for `asset_id`
    pub fn fail_delete_asset(&self, asset_id: u64, msg: &str) {
        *self.error_on_delete_asset.lock().unwrap() = Some((asset_id, msg.to_string()));
    }

    /// Make `upload_asset` fail for `file_name`
    pub fn fail_upload(&self, file_name: &str, msg: &str) {
        *self.error_on_upload.lock().unwrap() = Some((file_name.to_string(), msg.to_string()));
    }

    // === Call verification methods ===

    /// Get all `list_closed_changes` calls
    pub fn get_list_changes_calls(&self) -> Vec<ListChangesCall> {
        self.list_changes_calls.lock().unwrap().clone()
    }

    /// Number of `list_releases` calls
    pub fn list_releases_call_count(&self) -> usize {
        *self.list_releases_calls.lock().unwrap()
    }

    /// Get all tags `get_release_by_tag` was called with
    pub fn get_release_calls(&self) -> Vec<String> {
        self.get_release_calls.lock().unwrap().clone()
    }

    /// Get all `create_release` calls
    pub fn get_create_release_calls(&self) -> Vec<NewRelease> {
        self.create_release_calls.lock().unwrap().clone()
    }

    /// Get all `update_release_body` calls
    pub fn get_update_body_calls(&self) -> Vec<UpdateBodyCall> {
        self.update_body_calls.lock().unwrap().clone()
    }

    /// Get all asset IDs `delete_asset` was called with
    pub fn get_delete_asset_calls(&self) -> Vec<u64> {
        self.delete_asset_calls.lock().unwrap().clone()
    }

    /// Get all `upload_asset` calls
    pub fn get_upload_calls(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    /// Number of mutating calls made (create, update, delete, upload)
    pub fn mutation_count(&self) -> usize {
        self.create_release_calls.lock().unwrap().len()
            + self.update_body_calls.lock().unwrap().len()
            + self.delete_asset_calls.lock().unwrap().len()
            + self.upload_calls.lock().unwrap().len()
    }

    /// Number of calls of any kind made
    pub fn call_count(&self) -> usize {
        self.mutation_count()
            + self.list_changes_calls.lock().unwrap().len()
            + self.list_releases_call_count()
            + self.get_release_calls.lock().unwrap().len()
    }

    /// Assert that no remote state was mutated
    pub fn assert_no_mutations(&self) {
        assert_eq!(
            self.mutation_count(),
            0,
            "Expected no mutations but got creates={:?} updates={:?} deletes={:?} uploads={:?}",
            self.get_create_release_calls(),
            self.get_update_body_calls(),
            self.get_delete_asset_calls(),
            self.get_upload_calls()
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_closed_changes(&self, base: Option<&str>, page: u32) -> Result<ChangePage> {
        self.list_changes_calls
            .lock()
            .unwrap()
            .push(ListChangesCall {
                base: base.map(ToString::to_string),
                page,
            });

        // Check for injected error
        if let Some((failing_page, msg)) = self.error_on_list_changes.lock().unwrap().as_ref()
            && *failing_page == page
        {
            return Err(Error::Fetch(msg.clone()));
        }

        let pages = self.pages.lock().unwrap();
        Ok(page
            .checked_sub(1)
            .and_then(|i| pages.get(i as usize))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>> {
        *self.list_releases_calls.lock().unwrap() += 1;

        if let Some(msg) = self.error_on_list_releases.lock().unwrap().as_ref() {
            return Err(Error::Fetch(msg.clone()));
        }

        Ok(self.summaries.lock().unwrap().clone())
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<Release> {
        self.get_release_calls.lock().unwrap().push(tag.to_string());

        if let Some(msg) = self.error_on_get_release.lock().unwrap().as_ref() {
            return Err(Error::Fetch(msg.clone()));
        }

        self.release(tag)
            .ok_or_else(|| Error::Fetch(format!("get release '{tag}': 404 Not Found")))
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release> {
        self.create_release_calls
            .lock()
            .unwrap()
            .push(release.clone());

        if let Some(msg) = self.error_on_create_release.lock().unwrap().as_ref() {
            return Err(Error::Publish(msg.clone()));
        }
        if self.release(&release.tag_name).is_some() {
            return Err(Error::Publish(format!(
                "create release '{}': 422 already_exists",
                release.tag_name
            )));
        }

        let created = self.add_release(&release.tag_name, &release.body, &[]);
        Ok(created)
    }

    async fn update_release_body(&self, release_id: u64, body: &str) -> Result<()> {
        self.update_body_calls.lock().unwrap().push(UpdateBodyCall {
            release_id,
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_update_body.lock().unwrap().as_ref() {
            return Err(Error::Publish(msg.clone()));
        }

        let mut releases = self.releases.lock().unwrap();
        let release = releases
            .values_mut()
            .find(|r| r.id == release_id)
            .ok_or_else(|| Error::Publish(format!("update release {release_id}: 404")))?;
        release.body = body.to_string();
        Ok(())
    }

    async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        self.delete_asset_calls.lock().unwrap().push(asset_id);

        if let Some((failing_id, msg)) = self.error_on_delete_asset.lock().unwrap().as_ref()
            && *failing_id == asset_id
        {
            return Err(Error::Publish(msg.clone()));
        }

        let mut releases = self.releases.lock().unwrap();
        let release = releases
            .values_mut()
            .find(|r| r.assets.iter().any(|a| a.id == asset_id))
            .ok_or_else(|| Error::Publish(format!("delete asset {asset_id}: 404")))?;
        release.assets.retain(|a| a.id != asset_id);
        Ok(())
    }

    async fn upload_asset(&self, upload_url: &str, upload: &AssetUpload) -> Result<()> {
        self.upload_calls.lock().unwrap().push(UploadCall {
            upload_url: upload_url.to_string(),
            file_name: upload.file_name.clone(),
            content_type: upload.content_type.clone(),
            size: upload.bytes.len(),
        });

        if let Some((file_name, msg)) = self.error_on_upload.lock().unwrap().as_ref()
            && *file_name == upload.file_name
        {
            return Err(Error::Publish(msg.clone()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut releases = self.releases.lock().unwrap();
        let release = releases
            .values_mut()
            .find(|r| r.upload_url == upload_url)
            .ok_or_else(|| Error::Publish(format!("upload {}: 404", upload.file_name)))?;
        release.assets.push(Asset {
            id,
            name: upload.file_name.clone(),
        });
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
