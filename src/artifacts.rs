//! Local build artifact discovery

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A local file to attach to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path on disk
    pub path: PathBuf,
    /// File name used for the uploaded asset
    pub file_name: String,
}

impl Artifact {
    /// Build from a path, taking the file name from its last component
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Artifact(format!("invalid artifact path: {}", path.display())))?
            .to_string();
        Ok(Self { path, file_name })
    }
}

/// Find exactly one file per pattern under `dir`, in pattern order
///
/// Zero or several matches for any pattern is an error, raised before any
/// network call is made.
pub fn discover_artifacts(dir: &Path, patterns: &[&str]) -> Result<Vec<Artifact>> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let mut artifacts = Vec::with_capacity(patterns.len());

    for pattern in patterns {
        let full = format!("{escaped_dir}/{pattern}");
        let mut matches: Vec<PathBuf> = glob::glob(&full)
            .map_err(|e| Error::Config(format!("invalid artifact pattern '{pattern}': {e}")))?
            .filter_map(std::result::Result::ok)
            .filter(|p| p.is_file())
            .collect();
        matches.sort();

        match matches.len() {
            0 => {
                return Err(Error::Artifact(format!(
                    "no matching files found for upload: {pattern} in {}",
                    dir.display()
                )));
            }
            1 => {
                let path = matches.remove(0);
                debug!(pattern, path = %path.display(), "found artifact");
                artifacts.push(Artifact::from_path(path)?);
            }
            n => {
                let names: Vec<String> = matches.iter().map(|p| p.display().to_string()).collect();
                return Err(Error::Artifact(format!(
                    "{n} files match {pattern}, expected exactly one: {}",
                    names.join(", ")
                )));
            }
        }
    }

    Ok(artifacts)
}
