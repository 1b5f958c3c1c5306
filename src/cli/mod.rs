//! CLI command implementations

pub mod context;
pub mod develop;
pub mod release;
pub mod style;

use anstream::println;
use async_trait::async_trait;
use devrel::progress::ProgressCallback;

/// Progress callback that prints each step to stdout
pub struct CliProgress {
    indent: usize,
}

impl CliProgress {
    /// Messages indented under the command header
    pub const fn compact() -> Self {
        Self { indent: 2 }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{:indent$}{message}", "", indent = self.indent);
    }
}
