//! Release publishing
//!
//! Two-phase pattern:
//! 1. Plan - create `PublishPlan` from the mode and rendered notes (pure)
//! 2. Execute - reconcile the remote release to the plan (effectful)

mod execute;
mod plan;

pub use execute::{PublishReport, ReleaseState, SkippedUpload, execute_publish};
pub use plan::{PublishPlan, PublishStep, ReleaseTarget, UploadPolicy, create_publish_plan};
