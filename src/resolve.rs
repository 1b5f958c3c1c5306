//! Divergence resolution - pure functions over fetched changes
//!
//! No platform I/O happens here. Promotion mode consults an
//! `AncestryOracle`; cutoff mode works on timestamps alone.

use crate::changes::is_bot_author;
use crate::repo::AncestryOracle;
use crate::types::{Commit, MergedChange, ReleaseSummary};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Changes selected for the release notes, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivergenceResult {
    /// Nothing qualifies
    Empty,
    /// At least one change qualifies
    Changes(Vec<MergedChange>),
}

impl DivergenceResult {
    /// Wrap a selection, mapping an empty one to `Empty`
    pub fn from_changes(changes: Vec<MergedChange>) -> Self {
        if changes.is_empty() {
            Self::Empty
        } else {
            Self::Changes(changes)
        }
    }

    /// Whether nothing qualified
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Selected changes (empty slice for `Empty`)
    pub fn changes(&self) -> &[MergedChange] {
        match self {
            Self::Empty => &[],
            Self::Changes(changes) => changes,
        }
    }

    /// Number of selected changes
    pub fn len(&self) -> usize {
        self.changes().len()
    }
}

/// Changes not yet promoted to `target_tip`, in fetch order
///
/// Ancestry rather than merge time decides: a change reachable from the
/// target (e.g. via fast-forward) is already promoted however recent, and an
/// old change only reachable through an unmerged branch is still pending. A
/// change without a merge commit, or whose merge commit is unknown to the
/// mirror, is not an ancestor and therefore pending.
pub fn resolve_pending(
    changes: Vec<MergedChange>,
    oracle: &dyn AncestryOracle,
    target_tip: &Commit,
) -> DivergenceResult {
    let total = changes.len();
    let pending: Vec<MergedChange> = changes
        .into_iter()
        .filter(|change| {
            change
                .merge_commit
                .as_ref()
                .is_none_or(|commit| !oracle.is_ancestor(commit, target_tip))
        })
        .collect();

    debug!(total, pending = pending.len(), tip = %target_tip, "resolved pending changes");
    DivergenceResult::from_changes(pending)
}

/// Changes merged strictly after `cutoff`, oldest first
///
/// Input is in fetch order (newest first); the selection is reversed for
/// display. Authors matching `bot_prefix` are excluded regardless of merge
/// time.
pub fn resolve_since(
    changes: Vec<MergedChange>,
    cutoff: DateTime<Utc>,
    bot_prefix: &str,
) -> DivergenceResult {
    let mut selected: Vec<MergedChange> = changes
        .into_iter()
        .filter(|change| change.merged_at > cutoff && !is_bot_author(&change.author, bot_prefix))
        .collect();
    selected.reverse();

    debug!(%cutoff, selected = selected.len(), "resolved changes since cutoff");
    DivergenceResult::from_changes(selected)
}

/// Creation time of the most recent prior release
///
/// Ignores the release being created (`new_tag`) and the rolling
/// pre-release (`rolling_tag`). With no prior release, every merged change
/// qualifies, so the cutoff is the Unix epoch.
pub fn release_cutoff(
    releases: &[ReleaseSummary],
    new_tag: &str,
    rolling_tag: &str,
) -> DateTime<Utc> {
    releases
        .iter()
        .filter(|r| r.tag != new_tag && r.tag != rolling_tag)
        .filter_map(|r| r.created_at)
        .max()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
