//! Cratedock - configure-time manifest assembly and crate staging.
//!
//! This crate provides the core library functionality for Cratedock:
//! collecting dependency locations advertised by upstream packages,
//! merging them into a build manifest, and staging the result into an
//! export directory that downstream packages can discover.

pub mod core;
pub mod index;
pub mod ops;
pub mod util;

pub use crate::core::{
    location::{CrateLocation, LocationRegistry},
    manifest::BaseManifest,
};

pub use crate::index::CrateIndex;
pub use crate::ops::configure::{run_configure_pass, ConfigureError, ConfigureSummary};
pub use crate::util::config::StageConfig;
