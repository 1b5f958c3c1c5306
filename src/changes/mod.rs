//! Merged change retrieval
//!
//! Split into a producer (`ChangePages`, one platform page per call) and a
//! consumer (`fetch_merged`) that decides inclusion per item and
//! continuation per page.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{ClosedChange, MergedChange};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// Options for `fetch_merged`
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions<'a> {
    /// Stop paging once no later page can hold a change merged after this
    ///
    /// Only bounds how many pages are read; it never filters items.
    pub since: Option<DateTime<Utc>>,
    /// Skip changes whose author login starts with this prefix
    pub exclude_author_prefix: Option<&'a str>,
}

/// Whether `author` is the automated dependency-update identity
///
/// An empty prefix matches nobody.
pub fn is_bot_author(author: &str, prefix: &str) -> bool {
    !prefix.is_empty() && author.starts_with(prefix)
}

/// Lazily produced pages of closed changes, optionally for one base branch
///
/// Finite and not restartable: once exhausted it yields `None` forever, and
/// a fresh `ChangePages` re-fetches from the platform.
pub struct ChangePages<'a> {
    platform: &'a dyn PlatformService,
    base: Option<String>,
    next_page: Option<u32>,
}

impl<'a> ChangePages<'a> {
    /// Start paging closed changes, targeting `base` when given
    pub fn new(platform: &'a dyn PlatformService, base: Option<&str>) -> Self {
        Self {
            platform,
            base: base.map(str::to_string),
            next_page: Some(1),
        }
    }

    /// Fetch the next non-empty page, or `None` when exhausted
    pub async fn next_page(&mut self) -> Result<Option<Vec<ClosedChange>>> {
        let Some(page) = self.next_page else {
            return Ok(None);
        };

        let result = self.platform.list_closed_changes(self.base.as_deref(), page).await?;
        self.next_page = (result.has_next && !result.changes.is_empty()).then_some(page + 1);

        if result.changes.is_empty() {
            self.next_page = None;
            return Ok(None);
        }
        Ok(Some(result.changes))
    }
}

/// Fetch merged changes (targeting `base` when given), in platform order
///
/// PRs closed without merging are dropped, as are duplicates of a PR number
/// already seen (a PR updated mid-scan can move between pages).
///
/// With `options.since`, paging stops after the first page whose least
/// recently *updated* change is at or before the cutoff. A PR's update time
/// is never earlier than its merge time and pages are sorted by update time,
/// so no later page can hold a change merged after the cutoff. Every item of
/// every page read is still examined individually.
pub async fn fetch_merged(
    platform: &dyn PlatformService,
    base: Option<&str>,
    options: FetchOptions<'_>,
) -> Result<Vec<MergedChange>> {
    let mut pages = ChangePages::new(platform, base);
    let mut merged = Vec::new();
    let mut seen = HashSet::new();
    let mut page_count = 0usize;

    while let Some(page) = pages.next_page().await? {
        page_count += 1;
        let oldest_update = page.iter().map(|c| c.updated_at).min();

        for change in page {
            let Some(change) = change.into_merged() else {
                continue;
            };
            if let Some(prefix) = options.exclude_author_prefix
                && is_bot_author(&change.author, prefix)
            {
                continue;
            }
            if seen.insert(change.number) {
                merged.push(change);
            }
        }

        if let (Some(cutoff), Some(oldest)) = (options.since, oldest_update)
            && oldest <= cutoff
        {
            debug!(page = page_count, %cutoff, "remaining pages predate cutoff");
            break;
        }
    }

    debug!(
        ?base,
        pages = page_count,
        count = merged.len(),
        "fetched merged changes"
    );
    Ok(merged)
}
