//! Local repository mirror and ancestry queries

mod git;

pub use git::GitMirror;

use crate::error::Result;
use crate::types::Commit;

/// Ancestry queries against a local repository mirror
///
/// Callers must synchronize the mirror before querying it in a run; the
/// oracle never refreshes itself.
pub trait AncestryOracle {
    /// Resolve a branch to its tip commit
    ///
    /// Fails with `Error::Sync` if the branch is unknown to the mirror.
    fn tip_of(&self, branch: &str) -> Result<Commit>;

    /// Whether `candidate` is an ancestor of (or equal to) `tip`
    ///
    /// A malformed or unknown candidate is not an ancestor; this never errors.
    fn is_ancestor(&self, candidate: &Commit, tip: &Commit) -> bool;
}
