//! In-memory commit graph for ancestry tests

#![allow(dead_code)]

use devrel::error::{Error, Result};
use devrel::repo::AncestryOracle;
use devrel::types::Commit;
use std::collections::{HashMap, HashSet};

/// Commit DAG with named branch tips
///
/// Commit ids are generated from a counter as 40-char hex strings.
#[derive(Default)]
pub struct InMemoryHistory {
    parents: HashMap<Commit, Vec<Commit>>,
    branches: HashMap<String, Commit>,
    counter: u64,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> Commit {
        self.counter += 1;
        Commit::new(format!("{:040x}", self.counter))
    }

    /// Add a commit with the given parents
    pub fn commit(&mut self, parents: &[&Commit]) -> Commit {
        let id = self.next_id();
        self.parents
            .insert(id.clone(), parents.iter().map(|p| (*p).clone()).collect());
        id
    }

    /// Add a commit on top of `branch` (a root commit if the branch is new)
    /// and advance the branch to it
    pub fn commit_on(&mut self, branch: &str) -> Commit {
        let parent = self.branches.get(branch).cloned();
        let id = match parent {
            Some(ref p) => self.commit(&[p]),
            None => self.commit(&[]),
        };
        self.branches.insert(branch.to_string(), id.clone());
        id
    }

    /// Merge `from` into `into` with a two-parent commit
    pub fn merge(&mut self, into: &str, from: &str) -> Commit {
        let into_tip = self.branches[into].clone();
        let from_tip = self.branches[from].clone();
        let id = self.commit(&[&into_tip, &from_tip]);
        self.branches.insert(into.to_string(), id.clone());
        id
    }

    /// Point `branch` at `commit`
    pub fn set_branch(&mut self, branch: &str, commit: &Commit) {
        self.branches.insert(branch.to_string(), commit.clone());
    }

    /// Move `into` to the tip of `from` (fast-forward)
    pub fn fast_forward(&mut self, into: &str, from: &str) {
        let tip = self.branches[from].clone();
        self.branches.insert(into.to_string(), tip);
    }
}

impl AncestryOracle for InMemoryHistory {
    fn tip_of(&self, branch: &str) -> Result<Commit> {
        self.branches
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::Sync(format!("unknown branch '{branch}'")))
    }

    fn is_ancestor(&self, candidate: &Commit, tip: &Commit) -> bool {
        if !self.parents.contains_key(candidate) {
            return false;
        }

        let mut stack = vec![tip.clone()];
        let mut seen = HashSet::new();
        while let Some(commit) = stack.pop() {
            if &commit == candidate {
                return true;
            }
            if seen.insert(commit.clone())
                && let Some(parents) = self.parents.get(&commit)
            {
                stack.extend(parents.iter().cloned());
            }
        }
        false
    }
}
