//! Release notes rendering
//!
//! Pure functions; the timestamp is an input so output is deterministic.

use crate::resolve::DivergenceResult;
use crate::types::Mode;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Body used for a dated release with no qualifying changes
pub const NO_CHANGES_SENTENCE: &str = "No non-Dependabot PRs since last release.";

/// Render release notes for `result`
///
/// `target_branch` names the stable branch in the promotion-mode header.
/// Cutoff-mode notes carry no header or timestamp, so `now` only affects the
/// trailing line of promotion-mode notes.
pub fn render(
    result: &DivergenceResult,
    mode: Mode,
    target_branch: &str,
    now: DateTime<Utc>,
) -> String {
    match mode {
        Mode::Promotion => render_pending(result, target_branch, now),
        Mode::Cutoff => render_since(result),
    }
}

fn render_pending(result: &DivergenceResult, target_branch: &str, now: DateTime<Utc>) -> String {
    let mut body = format!("### Changes not yet in {target_branch}:\n\n");

    if result.is_empty() {
        body.push_str("_No pending changes._\n");
    }
    for change in result.changes() {
        let _ = writeln!(
            body,
            "- PR [#{}] {} (@{})",
            change.number, change.title, change.author
        );
    }

    let _ = write!(body, "\n_Last updated: {}_", format_timestamp(now));
    body
}

fn render_since(result: &DivergenceResult) -> String {
    if result.is_empty() {
        return NO_CHANGES_SENTENCE.to_string();
    }

    result
        .changes()
        .iter()
        .map(|change| format!("- #{} {}", change.number, change.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// UTC timestamp at minute precision
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}
