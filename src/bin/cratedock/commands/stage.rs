//! `cratedock stage` command

use anyhow::Result;

use crate::cli::StageArgs;
use cratedock::ops::configure::run_configure_pass;

pub fn execute(args: StageArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;

    if let Some(export_dir) = args.export_dir {
        config.export_dir = export_dir;
    }
    if let Some(index) = args.index {
        config.index_dir = index;
    }

    let summary = run_configure_pass(&config, &args.with_locations, args.dry_run)?;

    if args.dry_run {
        eprintln!(
            "     Planned {} ({} dependencies, nothing written)",
            summary.export_dir.display(),
            summary.locations.len()
        );
    } else {
        eprintln!(
            "      Staged {} ({} dependencies, {} files)",
            summary.export_dir.display(),
            summary.locations.len(),
            summary.files_copied + 1
        );
    }

    Ok(())
}
