//! devrel - rolling develop pre-release and dated release publisher
//!
//! Keeps a GitHub pre-release in step with the PRs merged to the
//! integration branch but not yet promoted to the stable branch, and cuts
//! dated releases summarizing everything merged since the previous one.
//!
//! The pipeline is:
//! 1. [`repo`] syncs the local mirror and answers ancestry queries
//! 2. [`changes`] pages merged PRs from the platform
//! 3. [`resolve`] selects pending or since-cutoff changes (pure)
//! 4. [`notes`] renders the selection (pure)
//! 5. [`publish`] reconciles the remote release and its assets
//!
//! [`flow`] runs the whole pipeline for each command.

pub mod artifacts;
pub mod auth;
pub mod changes;
pub mod config;
pub mod error;
pub mod flow;
pub mod notes;
pub mod platform;
pub mod progress;
pub mod publish;
pub mod repo;
pub mod resolve;
pub mod types;
