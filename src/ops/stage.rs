//! Export-directory staging.
//!
//! Staging copies the assembled manifest and the fixed auxiliary build
//! inputs into a freshly created export directory:
//!
//! ```text
//! <export-root>/
//! ├── Cargo.toml        assembled manifest
//! ├── build.rs          auxiliary input
//! ├── rcl_wrapper.h     auxiliary input
//! └── src/              recursive copy of the source tree
//! ```
//!
//! The copies are described up front as an ordered plan, so a run can be
//! audited (or dry-run) without touching the filesystem.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::core::manifest::MANIFEST_NAME;
use crate::util::fs::{copy_file, ensure_dir, remove_dir_all_if_exists, write_string};

/// Subdirectory of the export root receiving the source tree.
pub const SOURCE_SUBDIR: &str = "src";

/// Options for staging an export directory.
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Export directory to assemble
    pub export_dir: PathBuf,

    /// Build script copied next to the manifest
    pub build_script: PathBuf,

    /// Interface header copied next to the manifest
    pub wrapper_header: PathBuf,

    /// Source tree copied under `src/`
    pub source_root: PathBuf,

    /// Plan only - don't touch the filesystem
    pub dry_run: bool,
}

impl StageOptions {
    /// Create staging options with the given export directory.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        StageOptions {
            export_dir: export_dir.into(),
            build_script: PathBuf::from("build.rs"),
            wrapper_header: PathBuf::from("rcl_wrapper.h"),
            source_root: PathBuf::from("src"),
            dry_run: false,
        }
    }

    /// Set the auxiliary build script path.
    pub fn with_build_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_script = path.into();
        self
    }

    /// Set the auxiliary interface header path.
    pub fn with_wrapper_header(mut self, path: impl Into<PathBuf>) -> Self {
        self.wrapper_header = path.into();
        self
    }

    /// Set the source tree root.
    pub fn with_source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_root = path.into();
        self
    }

    /// Set dry run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One planned copy: a source file and its destination relative to the
/// export root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEntry {
    /// File to copy
    pub source: PathBuf,

    /// Destination, relative to the export root
    pub dest: PathBuf,
}

/// The staging plan: the manifest to write plus every copy to perform,
/// in execution order.
#[derive(Debug, Clone)]
pub struct StagePlan {
    /// Assembled manifest content, written to `Cargo.toml`
    pub manifest: String,

    /// Copies in execution order: auxiliary inputs, then the source tree
    pub entries: Vec<StageEntry>,
}

/// Result of an executed staging run.
#[derive(Debug, Clone)]
pub struct StageResult {
    /// The populated export directory
    pub export_dir: PathBuf,

    /// Path of the staged manifest
    pub manifest_path: PathBuf,

    /// Number of files copied (manifest excluded)
    pub files_copied: usize,
}

/// Build the staging plan for the given inputs.
///
/// Auxiliary inputs come first, then one entry per file of the source
/// tree in a sorted walk, so the same inputs always produce the same
/// plan. Fails if the source tree root does not exist.
pub fn plan_stage(opts: &StageOptions, manifest: String) -> Result<StagePlan> {
    if !opts.source_root.is_dir() {
        bail!("source tree not found: {}", opts.source_root.display());
    }

    let mut entries = vec![
        StageEntry {
            source: opts.build_script.clone(),
            dest: PathBuf::from("build.rs"),
        },
        StageEntry {
            source: opts.wrapper_header.clone(),
            dest: PathBuf::from("rcl_wrapper.h"),
        },
    ];

    for entry in WalkDir::new(&opts.source_root)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.with_context(|| {
            format!("failed to walk source tree: {}", opts.source_root.display())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&opts.source_root)
            .expect("walked path is under the source root");

        entries.push(StageEntry {
            source: entry.path().to_path_buf(),
            dest: Path::new(SOURCE_SUBDIR).join(relative),
        });
    }

    Ok(StagePlan { manifest, entries })
}

impl StagePlan {
    /// Execute the plan into the export directory.
    ///
    /// Any existing tree at the export path is removed first; the
    /// directory is fully regenerated on every run. Any copy failure
    /// aborts immediately and leaves the partial tree behind - callers
    /// treat it as invalid and re-run.
    pub fn execute(&self, opts: &StageOptions) -> Result<StageResult> {
        let export_dir = &opts.export_dir;

        if opts.dry_run {
            tracing::info!(
                "[dry-run] would stage {} file(s) into {}",
                self.entries.len() + 1,
                export_dir.display()
            );
            for entry in &self.entries {
                tracing::info!(
                    "[dry-run] would copy {} -> {}",
                    entry.source.display(),
                    entry.dest.display()
                );
            }
            return Ok(StageResult {
                export_dir: export_dir.clone(),
                manifest_path: export_dir.join(MANIFEST_NAME),
                files_copied: 0,
            });
        }

        remove_dir_all_if_exists(export_dir)?;
        ensure_dir(export_dir)?;

        let manifest_path = export_dir.join(MANIFEST_NAME);
        write_string(&manifest_path, &self.manifest)?;

        for entry in &self.entries {
            copy_file(&entry.source, &export_dir.join(&entry.dest))?;
            tracing::debug!("staged {}", entry.dest.display());
        }

        tracing::info!(
            "staged {} file(s) into {}",
            self.entries.len() + 1,
            export_dir.display()
        );

        Ok(StageResult {
            export_dir: export_dir.clone(),
            manifest_path,
            files_copied: self.entries.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Lay out a package to stage: aux inputs plus a nested source tree.
    fn stage_fixture(root: &Path) -> StageOptions {
        fs::write(root.join("build.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("rcl_wrapper.h"), "#include <rcl/rcl.h>\n").unwrap();

        let src = root.join("src");
        fs::create_dir_all(src.join("y")).unwrap();
        fs::write(src.join("x.rs"), "pub fn x() {}\n").unwrap();
        fs::write(src.join("y/z.rs"), "pub fn z() {}\n").unwrap();

        StageOptions::new(root.join("export"))
            .with_build_script(root.join("build.rs"))
            .with_wrapper_header(root.join("rcl_wrapper.h"))
            .with_source_root(src)
    }

    #[test]
    fn test_plan_lists_aux_inputs_first() {
        let tmp = TempDir::new().unwrap();
        let opts = stage_fixture(tmp.path());

        let plan = plan_stage(&opts, String::new()).unwrap();

        assert_eq!(plan.entries[0].dest, PathBuf::from("build.rs"));
        assert_eq!(plan.entries[1].dest, PathBuf::from("rcl_wrapper.h"));
        let dests: Vec<_> = plan.entries[2..].iter().map(|e| e.dest.clone()).collect();
        assert_eq!(
            dests,
            vec![PathBuf::from("src/x.rs"), PathBuf::from("src/y/z.rs")]
        );
    }

    #[test]
    fn test_execute_reproduces_source_tree() {
        let tmp = TempDir::new().unwrap();
        let opts = stage_fixture(tmp.path());

        let plan = plan_stage(&opts, "[package]\nname = \"staged\"\n".to_string()).unwrap();
        let result = plan.execute(&opts).unwrap();

        assert_eq!(result.files_copied, 4);
        let export = &opts.export_dir;
        assert_eq!(
            fs::read_to_string(export.join("Cargo.toml")).unwrap(),
            "[package]\nname = \"staged\"\n"
        );
        assert!(export.join("build.rs").exists());
        assert!(export.join("rcl_wrapper.h").exists());
        assert_eq!(
            fs::read_to_string(export.join("src/x.rs")).unwrap(),
            "pub fn x() {}\n"
        );
        assert_eq!(
            fs::read_to_string(export.join("src/y/z.rs")).unwrap(),
            "pub fn z() {}\n"
        );
    }

    #[test]
    fn test_execute_regenerates_fresh() {
        let tmp = TempDir::new().unwrap();
        let opts = stage_fixture(tmp.path());

        // A stale file from an earlier run must not survive.
        let stale = opts.export_dir.join("stale.txt");
        fs::create_dir_all(&opts.export_dir).unwrap();
        fs::write(&stale, "old").unwrap();

        let plan = plan_stage(&opts, String::new()).unwrap();
        plan.execute(&opts).unwrap();

        assert!(!stale.exists());
        assert!(opts.export_dir.join("Cargo.toml").exists());
    }

    #[test]
    fn test_missing_source_root_fails_then_clean_rerun_succeeds() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("build.rs"), "fn main() {}\n").unwrap();
        fs::write(tmp.path().join("rcl_wrapper.h"), "\n").unwrap();

        let opts = StageOptions::new(tmp.path().join("export"))
            .with_build_script(tmp.path().join("build.rs"))
            .with_wrapper_header(tmp.path().join("rcl_wrapper.h"))
            .with_source_root(tmp.path().join("src"));

        let err = plan_stage(&opts, String::new()).unwrap_err().to_string();
        assert!(err.contains("source tree not found"));

        // Fix the cause and re-run from scratch.
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/lib.rs"), "\n").unwrap();

        let plan = plan_stage(&opts, String::new()).unwrap();
        let result = plan.execute(&opts).unwrap();
        assert_eq!(result.files_copied, 3);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let opts = stage_fixture(tmp.path()).with_dry_run(true);

        let plan = plan_stage(&opts, String::new()).unwrap();
        let result = plan.execute(&opts).unwrap();

        assert_eq!(result.files_copied, 0);
        assert!(!opts.export_dir.exists());
    }
}
