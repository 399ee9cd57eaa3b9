//! Site manifest and resolved build configuration.
//!
//! The manifest is an optional `glean.json` at the content root. CLI flags
//! override it; it overrides the defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GleanError, Result};
use crate::types::SourceType;
use crate::utils::DEFAULT_EXCERPT_LEN;

/// Manifest file name, looked up in the content directory.
pub const MANIFEST_FILE: &str = "glean.json";

/// Manifest schema version this build understands.
pub const MANIFEST_VERSION: u32 = 1;

/// Default artifact file name.
pub const DEFAULT_OUTPUT_FILE: &str = "search-index.json";

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteManifest {
    pub version: Option<u32>,
    /// Artifact file name inside the output directory.
    pub output: Option<String>,
    pub excerpt_length: Option<usize>,
    /// Collection directory per source type, relative to the content root.
    pub collections: BTreeMap<SourceType, String>,
}

impl SiteManifest {
    pub fn parse(json: &str) -> Result<Self> {
        let manifest: SiteManifest = serde_json::from_str(json)
            .map_err(|e| GleanError::manifest(format!("invalid {}: {}", MANIFEST_FILE, e)))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if let Some(version) = self.version {
            if version != MANIFEST_VERSION {
                return Err(GleanError::manifest(format!(
                    "unsupported manifest version {} (expected {})",
                    version, MANIFEST_VERSION
                )));
            }
        }
        if let Some(output) = &self.output {
            validate_output_file(output)?;
        }
        for (source, dir) in &self.collections {
            if dir.trim().is_empty() {
                return Err(GleanError::manifest(format!(
                    "collection directory for '{}' is empty",
                    source
                )));
            }
        }
        Ok(())
    }
}

/// Read `<content_dir>/glean.json`. A missing file is not an error.
pub fn load_manifest(content_dir: &Path) -> Result<Option<SiteManifest>> {
    let path = content_dir.join(MANIFEST_FILE);
    match fs::read_to_string(&path) {
        Ok(json) => SiteManifest::parse(&json).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GleanError::io(path, e)),
    }
}

fn validate_output_file(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(GleanError::manifest(format!(
            "output must be a plain file name, got '{}'",
            name
        )));
    }
    Ok(())
}

/// Command-line values that take precedence over the manifest.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub excerpt_len: Option<usize>,
    pub output_file: Option<String>,
    pub pretty: bool,
}

/// Fully resolved build configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildConfig {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub excerpt_len: usize,
    pub pretty: bool,
    pub collections: BTreeMap<SourceType, String>,
}

impl BuildConfig {
    /// Defaults, then the manifest, then `overrides`.
    pub fn resolve(
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let content_dir = content_dir.into();
        let manifest = load_manifest(&content_dir)?.unwrap_or_default();

        let output_file = overrides
            .output_file
            .or(manifest.output)
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        validate_output_file(&output_file)?;

        Ok(Self {
            content_dir,
            output_dir: output_dir.into(),
            output_file,
            excerpt_len: overrides
                .excerpt_len
                .or(manifest.excerpt_length)
                .unwrap_or(DEFAULT_EXCERPT_LEN),
            pretty: overrides.pretty,
            collections: manifest.collections,
        })
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}
