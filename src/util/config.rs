//! Configuration file support for Cratedock.
//!
//! A staging run is described by a small TOML file, `cratedock.toml`,
//! kept next to the package being staged. All paths are resolved
//! relative to the directory containing the config file. CLI flags
//! override individual values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file name.
pub const CONFIG_NAME: &str = "cratedock.toml";

/// Configuration for one staging run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StageConfig {
    /// Name under which the export directory is registered
    pub package: String,

    /// Base manifest to append generated dependency sections to
    pub base_manifest: PathBuf,

    /// Build script staged next to the manifest
    pub build_script: PathBuf,

    /// Interface header staged next to the manifest
    pub wrapper_header: PathBuf,

    /// Source tree copied into the export directory
    pub source_root: PathBuf,

    /// Where the staged tree is assembled
    pub export_dir: PathBuf,

    /// Root of the crate-source index used for discovery and registration
    pub index_dir: PathBuf,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            package: "rcl_bindings".to_string(),
            base_manifest: PathBuf::from("Cargo.toml.in"),
            build_script: PathBuf::from("build.rs"),
            wrapper_header: PathBuf::from("rcl_wrapper.h"),
            source_root: PathBuf::from("src"),
            export_dir: PathBuf::from("export"),
            index_dir: PathBuf::from("index"),
        }
    }
}

impl StageConfig {
    /// Load configuration from a file.
    ///
    /// Relative paths in the file are rebased onto its parent directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let mut config: StageConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }

        Ok(config)
    }

    /// Rebase all relative paths onto the given directory.
    pub fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.base_manifest,
            &mut self.build_script,
            &mut self.wrapper_header,
            &mut self.source_root,
            &mut self.export_dir,
            &mut self.index_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
