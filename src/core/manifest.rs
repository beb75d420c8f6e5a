//! Base manifest handling and dependency fragment rendering.
//!
//! The base manifest is opaque text supplied by the package author; it is
//! never parsed here. Assembly appends one generated dependency section
//! per registered crate location, in registry order.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::location::{CrateLocation, LocationRegistry};

/// Package identifier used for every generated dependency section.
pub const DEP_PACKAGE_NAME: &str = "rcl_common";

/// File name of the staged manifest.
pub const MANIFEST_NAME: &str = "Cargo.toml";

/// The base manifest: opaque text content, used as an immutable prefix.
#[derive(Debug, Clone)]
pub struct BaseManifest {
    content: String,
}

impl BaseManifest {
    /// Load the base manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read base manifest: {}", path.display()))?;

        Ok(BaseManifest { content })
    }

    /// Wrap already-loaded manifest content.
    pub fn from_content(content: impl Into<String>) -> Self {
        BaseManifest {
            content: content.into(),
        }
    }

    /// Get the manifest text.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Render the dependency section for one crate location.
pub fn render_fragment(location: &CrateLocation) -> String {
    format!("[dependencies.{}]\npath = '{}'\n", DEP_PACKAGE_NAME, location)
}

/// Render all dependency sections in registry order.
///
/// The same registry always yields byte-identical output.
pub fn render_fragments(registry: &LocationRegistry) -> String {
    let mut fragments = String::new();
    for location in registry {
        fragments.push_str(&render_fragment(location));
    }
    fragments
}

/// Assemble the final manifest: base content with all fragments appended.
///
/// An empty registry returns the base content unchanged.
pub fn assemble(base: &BaseManifest, registry: &LocationRegistry) -> String {
    if registry.len() > 1 {
        // Every section carries the same package name, so merging more
        // than one location produces duplicate section headers. Downstream
        // consumers may reject the manifest or silently keep one entry.
        tracing::warn!(
            "{} crate locations merged under the single section name `{}`",
            registry.len(),
            DEP_PACKAGE_NAME
        );
    }

    let mut manifest = base.content().to_string();
    manifest.push_str(&render_fragments(registry));
    manifest
}
