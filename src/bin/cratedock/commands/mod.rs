//! Command implementations

pub mod completions;
pub mod locations;
pub mod stage;

use std::path::Path;

use anyhow::{bail, Result};

use cratedock::util::config::{StageConfig, CONFIG_NAME};

/// Load the staging configuration, defaulting to `./cratedock.toml`.
pub fn load_config(explicit: Option<&Path>) -> Result<StageConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Path::new(CONFIG_NAME).to_path_buf(),
    };

    if !path.exists() {
        bail!(
            "no config found: {} (run in the package root or pass --config)",
            path.display()
        );
    }

    StageConfig::load(&path)
}
