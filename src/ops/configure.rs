//! The full configure pass.
//!
//! One linear, run-to-completion sequence: discover upstream crate
//! locations, deduplicate them, assemble the final manifest, stage the
//! export directory, and register it for downstream discovery. There is
//! no retry or partial-success state; a failed pass is re-run after the
//! underlying cause is fixed.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::location::{CrateLocation, LocationRegistry};
use crate::core::manifest::{assemble, BaseManifest};
use crate::index::CrateIndex;
use crate::ops::stage::{plan_stage, StageOptions};
use crate::util::config::StageConfig;
use crate::util::fs::absolutize;

/// A configure-pass failure, tagged with the step that failed.
///
/// The underlying cause chain is folded into the message; `anyhow::Error`
/// carries its own chain and cannot act as a `source`.
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("dependency discovery failed: {0:#}")]
    Discovery(anyhow::Error),

    #[error("manifest assembly failed: {0:#}")]
    Assembly(anyhow::Error),

    #[error("staging failed: {0:#}")]
    Staging(anyhow::Error),

    #[error("registration failed: {0:#}")]
    Registration(anyhow::Error),
}

/// Outcome of a completed configure pass.
#[derive(Debug, Clone)]
pub struct ConfigureSummary {
    /// Unique dependency locations, in first-seen order
    pub locations: Vec<CrateLocation>,

    /// The populated export directory
    pub export_dir: PathBuf,

    /// Path of the staged manifest
    pub manifest_path: PathBuf,

    /// Number of files copied into the export directory
    pub files_copied: usize,
}

/// Gather the deduplicated location registry for a configuration.
///
/// The raw list is the index discovery output followed by any explicitly
/// supplied locations, in that order.
pub fn collect_locations(
    config: &StageConfig,
    extra: &[String],
) -> Result<LocationRegistry, ConfigureError> {
    let index = CrateIndex::new(&config.index_dir);
    let mut raw = index.discover().map_err(ConfigureError::Discovery)?;
    raw.extend(extra.iter().map(|path| CrateLocation::new(path.as_str())));

    let registry = LocationRegistry::from_raw(raw);
    tracing::debug!("collected {} unique crate location(s)", registry.len());

    Ok(registry)
}

/// Run the configure pass: discover, collect, assemble, stage, register.
///
/// With `dry_run` set, the pass stops after planning; nothing is written
/// and no registration happens.
pub fn run_configure_pass(
    config: &StageConfig,
    extra: &[String],
    dry_run: bool,
) -> Result<ConfigureSummary, ConfigureError> {
    let registry = collect_locations(config, extra)?;

    let base = BaseManifest::load(&config.base_manifest).map_err(ConfigureError::Assembly)?;
    let manifest = assemble(&base, &registry);

    let opts = StageOptions::new(&config.export_dir)
        .with_build_script(&config.build_script)
        .with_wrapper_header(&config.wrapper_header)
        .with_source_root(&config.source_root)
        .with_dry_run(dry_run);

    let plan = plan_stage(&opts, manifest).map_err(ConfigureError::Staging)?;
    let staged = plan.execute(&opts).map_err(ConfigureError::Staging)?;

    if !dry_run {
        // Downstream consumers resolve the registered location from
        // anywhere, so it must be absolute.
        let export_dir =
            absolutize(&staged.export_dir).map_err(ConfigureError::Registration)?;

        let index = CrateIndex::new(&config.index_dir);
        index
            .register(&config.package, &export_dir)
            .map_err(ConfigureError::Registration)?;
    }

    Ok(ConfigureSummary {
        locations: registry.locations().to_vec(),
        export_dir: staged.export_dir,
        manifest_path: staged.manifest_path,
        files_copied: staged.files_copied,
    })
}
