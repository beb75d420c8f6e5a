//! Crate-source index - how packages advertise and discover crate sources.
//!
//! The index is a plain directory tree shared by every package in an
//! installation prefix. Each package that exports Rust crates drops one
//! marker file under the `rust_crates` resource directory:
//!
//! ```text
//! index/
//! └── rust_crates/
//!     ├── sensor_msgs        # one line per advertised crate location
//!     └── std_msgs
//! ```
//!
//! Discovery reads every marker file in package-name order and returns
//! the raw, possibly-overlapping location list. Registration writes the
//! marker for the package being staged, pointing downstream consumers at
//! its export directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::location::CrateLocation;
use crate::util::fs::write_string;

/// Resource directory name under the index root.
pub const CRATE_RESOURCE_TYPE: &str = "rust_crates";

/// A filesystem-backed index of crate-source locations.
#[derive(Debug, Clone)]
pub struct CrateIndex {
    /// The index root shared by all packages in the prefix
    root: PathBuf,
}

impl CrateIndex {
    /// Create an index handle rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CrateIndex { root: root.into() }
    }

    /// The index root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the per-package marker files.
    pub fn resource_dir(&self) -> PathBuf {
        self.root.join(CRATE_RESOURCE_TYPE)
    }

    /// Read the raw crate-location list advertised by upstream packages.
    ///
    /// Marker files are visited in lexicographic package-name order so the
    /// list is reproducible across runs. The list may contain repeats; the
    /// caller deduplicates. A missing index root means the upstream list
    /// is unavailable and is an error; a missing resource directory means
    /// no package advertises crates and yields an empty list.
    pub fn discover(&self) -> Result<Vec<CrateLocation>> {
        if !self.root.exists() {
            bail!("crate index not found: {}", self.root.display());
        }

        let resource_dir = self.resource_dir();
        if !resource_dir.exists() {
            tracing::debug!("no {} resources under {}", CRATE_RESOURCE_TYPE, self.root.display());
            return Ok(Vec::new());
        }

        let mut markers: Vec<PathBuf> = std::fs::read_dir(&resource_dir)
            .with_context(|| format!("failed to read index: {}", resource_dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        markers.sort();

        let mut locations = Vec::new();
        for marker in &markers {
            let content = std::fs::read_to_string(marker)
                .with_context(|| format!("failed to read index entry: {}", marker.display()))?;

            for line in content.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    locations.push(CrateLocation::new(line));
                }
            }
        }

        tracing::debug!(
            "discovered {} crate location(s) from {} package(s)",
            locations.len(),
            markers.len()
        );

        Ok(locations)
    }

    /// Publish an export directory as a crate-source location.
    ///
    /// Writes this package's marker file, creating the resource directory
    /// if needed. An existing marker from a previous run is overwritten.
    pub fn register(&self, package: &str, export_dir: &Path) -> Result<()> {
        let marker = self.resource_dir().join(package);

        write_string(&marker, &format!("{}\n", export_dir.display()))
            .with_context(|| format!("failed to register package `{}`", package))?;

        tracing::info!("registered {} -> {}", package, export_dir.display());
        Ok(())
    }
}
