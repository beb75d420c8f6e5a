//! `cratedock locations` command

use anyhow::Result;

use crate::cli::LocationsArgs;
use cratedock::ops::configure::collect_locations;

pub fn execute(args: LocationsArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;

    if let Some(index) = args.index {
        config.index_dir = index;
    }

    let registry = collect_locations(&config, &args.with_locations)?;

    for location in &registry {
        println!("{}", location);
    }

    Ok(())
}
