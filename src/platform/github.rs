//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PAGE_SIZE, PlatformService};
use crate::types::{
    Asset, AssetUpload, ChangePage, ClosedChange, Commit, NewRelease, PlatformConfig, Release,
    ReleaseSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.github.com";

// REST response types for the raw mutation endpoints

#[derive(Deserialize)]
struct RawRelease {
    id: u64,
    tag_name: String,
    body: Option<String>,
    html_url: String,
    upload_url: String,
    #[serde(default)]
    assets: Vec<RawAsset>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawAsset {
    id: u64,
    name: String,
}

impl From<RawRelease> for Release {
    fn from(r: RawRelease) -> Self {
        Self {
            id: r.id,
            tag: r.tag_name,
            body: r.body.unwrap_or_default(),
            html_url: r.html_url,
            upload_url: r.upload_url,
            assets: r
                .assets
                .into_iter()
                .map(|a| Asset {
                    id: a.id,
                    name: a.name,
                })
                .collect(),
            created_at: r.created_at,
        }
    }
}

/// GitHub service using octocrab for reads and raw HTTP for release mutations
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, api_url: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = if let Some(ref base) = api_url {
            builder = builder
                .base_uri(base.as_str())
                .map_err(|e| Error::Config(format!("invalid API URL '{base}': {e}")))?;
            base.trim_end_matches('/').to_string()
        } else {
            DEFAULT_API_URL.to_string()
        };

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to create GitHub client: {e}")))?;

        let http_client = Client::builder()
            .user_agent("devrel")
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_url,
            },
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_base, self.config.owner, self.config.repo, path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// Fail with `Error::Publish` unless the mutation succeeded
async fn ensure_published(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(Error::Publish(format!("{action}: {status} {}", text.trim())))
}

/// Build the concrete upload URL from a release's `upload_url` template
///
/// The `{?name,label}` suffix is stripped and `name=<file_name>` appended.
pub fn upload_endpoint(template: &str, file_name: &str) -> Result<Url> {
    let base = template.split('{').next().unwrap_or(template);
    let mut url = Url::parse(base)
        .map_err(|e| Error::Publish(format!("invalid upload URL '{template}': {e}")))?;
    url.query_pairs_mut().append_pair("name", file_name);
    Ok(url)
}

/// Helper to convert an octocrab PR to our `ClosedChange` type
fn change_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> ClosedChange {
    ClosedChange {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_default(),
        merge_commit: pr.merge_commit_sha.as_deref().map(Commit::from),
        merged_at: pr.merged_at,
        // A missing update time must never look older than the merge
        updated_at: pr
            .updated_at
            .or(pr.closed_at)
            .or(pr.merged_at)
            .unwrap_or_else(Utc::now),
    }
}

/// Helper to convert an octocrab release to our `Release` type
fn release_from_octocrab(r: octocrab::models::repos::Release) -> Release {
    Release {
        id: r.id.0,
        tag: r.tag_name,
        body: r.body.unwrap_or_default(),
        html_url: r.html_url.to_string(),
        upload_url: r.upload_url,
        assets: r
            .assets
            .into_iter()
            .map(|a| Asset {
                id: a.id.0,
                name: a.name,
            })
            .collect(),
        created_at: r.created_at,
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_closed_changes(&self, base: Option<&str>, page: u32) -> Result<ChangePage> {
        debug!(?base, page, "listing closed PRs");
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut builder = pulls
            .list()
            .state(octocrab::params::State::Closed)
            .sort(octocrab::params::pulls::Sort::Updated)
            .direction(octocrab::params::Direction::Descending)
            .per_page(PAGE_SIZE)
            .page(page);

        if let Some(base_branch) = base {
            builder = builder.base(base_branch);
        }

        let result = builder
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("list pull requests (page {page}): {e}")))?;

        let changes: Vec<ClosedChange> = result.items.iter().map(change_from_octocrab).collect();
        debug!(page, count = changes.len(), "listed closed PRs");
        Ok(ChangePage {
            changes,
            has_next: result.next.is_some(),
        })
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>> {
        debug!("listing releases");
        let page = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .list()
            .per_page(PAGE_SIZE)
            .page(1u32)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("list releases: {e}")))?;

        let releases: Vec<ReleaseSummary> = page
            .items
            .into_iter()
            .map(|r| ReleaseSummary {
                tag: r.tag_name,
                created_at: r.created_at,
            })
            .collect();
        debug!(count = releases.len(), "listed releases");
        Ok(releases)
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<Release> {
        debug!(tag, "getting release");
        let release = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_by_tag(tag)
            .await
            .map_err(|e| Error::Fetch(format!("get release '{tag}': {e}")))?;

        let result = release_from_octocrab(release);
        debug!(tag, release_id = result.id, assets = result.assets.len(), "got release");
        Ok(result)
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release> {
        debug!(tag = %release.tag_name, "creating release");
        let response = self
            .request(Method::POST, &self.repo_url("/releases"))
            .json(release)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("create release '{}': {e}", release.tag_name)))?;

        let created: RawRelease = ensure_published(
            response,
            &format!("create release '{}'", release.tag_name),
        )
        .await?
        .json()
        .await
        .map_err(|e| Error::Publish(format!("failed to parse created release: {e}")))?;

        let result: Release = created.into();
        debug!(release_id = result.id, "created release");
        Ok(result)
    }

    async fn update_release_body(&self, release_id: u64, body: &str) -> Result<()> {
        debug!(release_id, "updating release notes");
        let response = self
            .request(Method::PATCH, &self.repo_url(&format!("/releases/{release_id}")))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .map_err(|e| Error::Publish(format!("update release {release_id}: {e}")))?;

        ensure_published(response, &format!("update release {release_id}")).await?;
        debug!(release_id, "updated release notes");
        Ok(())
    }

    async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        debug!(asset_id, "deleting asset");
        let response = self
            .request(
                Method::DELETE,
                &self.repo_url(&format!("/releases/assets/{asset_id}")),
            )
            .send()
            .await
            .map_err(|e| Error::Publish(format!("delete asset {asset_id}: {e}")))?;

        ensure_published(response, &format!("delete asset {asset_id}")).await?;
        debug!(asset_id, "deleted asset");
        Ok(())
    }

    async fn upload_asset(&self, upload_url: &str, upload: &AssetUpload) -> Result<()> {
        let url = upload_endpoint(upload_url, &upload.file_name)?;
        debug!(file = %upload.file_name, size = upload.bytes.len(), "uploading asset");

        let response = self
            .request(Method::POST, url.as_str())
            .header(CONTENT_TYPE, &upload.content_type)
            .body(upload.bytes.clone())
            .send()
            .await
            .map_err(|e| Error::Publish(format!("upload {}: {e}", upload.file_name)))?;

        ensure_published(response, &format!("upload {}", upload.file_name)).await?;
        debug!(file = %upload.file_name, "uploaded asset");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
