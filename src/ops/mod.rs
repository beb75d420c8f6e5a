//! High-level operations.
//!
//! This module contains the implementation of Cratedock commands.

pub mod configure;
pub mod stage;

pub use configure::{run_configure_pass, ConfigureError, ConfigureSummary};
pub use stage::{plan_stage, StageEntry, StageOptions, StagePlan, StageResult, SOURCE_SUBDIR};
