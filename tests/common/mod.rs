//! Shared test utilities

#![allow(dead_code)]

mod history;
mod mock_platform;

pub use history::InMemoryHistory;
pub use mock_platform::{ListChangesCall, MockPlatformService, UpdateBodyCall, UploadCall};
pub use temp_repo::TempGitRepo;

use chrono::{DateTime, TimeZone, Utc};
use devrel::artifacts::Artifact;
use devrel::types::{ClosedChange, Commit, MergedChange, PlatformConfig};
use std::path::Path;

/// Platform config for `test/repo` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        api_url: None,
    }
}

/// Midnight UTC on the given day
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// A closed PR merged at `merged_at` (and last updated then)
pub fn make_change(
    number: u64,
    author: &str,
    merge_commit: Option<&Commit>,
    merged_at: DateTime<Utc>,
) -> ClosedChange {
    ClosedChange {
        number,
        title: format!("Change {number}"),
        author: author.to_string(),
        merge_commit: merge_commit.cloned(),
        merged_at: Some(merged_at),
        updated_at: merged_at,
    }
}

/// A PR closed without merging
pub fn make_unmerged(number: u64, updated_at: DateTime<Utc>) -> ClosedChange {
    ClosedChange {
        number,
        title: format!("Abandoned {number}"),
        author: "octocat".to_string(),
        merge_commit: None,
        merged_at: None,
        updated_at,
    }
}

/// A merged change, as the fetcher returns it
pub fn make_merged(number: u64, author: &str, merged_at: DateTime<Utc>) -> MergedChange {
    make_change(number, author, None, merged_at)
        .into_merged()
        .unwrap()
}

/// Write the two droid artifacts for `version` into `dir`
pub fn write_artifacts(dir: &Path, version: &str) -> Vec<Artifact> {
    [
        format!("droid-binary-{version}-bin-win64-with-jre.zip"),
        format!("droid-binary-{version}-bin.zip"),
    ]
    .iter()
    .map(|name| {
        let path = dir.join(name);
        std::fs::write(&path, format!("contents of {name}")).unwrap();
        Artifact::from_path(path).unwrap()
    })
    .collect()
}
