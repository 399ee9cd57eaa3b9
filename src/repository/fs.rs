// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markdown-on-disk content repository.
//!
//! Layout: `<root>/<collection>/**/*.{md,mdx}`, each file optionally starting
//! with a YAML frontmatter block between `---` fences. One collection
//! directory per source type; the directory name defaults to the source type
//! name and can be overridden from the site manifest.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::ContentRepository;
use crate::error::{GleanError, Result};
use crate::types::{Frontmatter, RawRecord, SourceType};

/// File extensions treated as content.
const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Reads collections from a content directory.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
    collections: BTreeMap<SourceType, String>,
}

impl FsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            collections: SourceType::ALL
                .into_iter()
                .map(|source| (source, source.as_str().to_string()))
                .collect(),
        }
    }

    /// Read `source` from `<root>/<dir>` instead of `<root>/<source>`.
    pub fn with_collection_dir(mut self, source: SourceType, dir: impl Into<String>) -> Self {
        self.collections.insert(source, dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, source: SourceType) -> PathBuf {
        let dir = self
            .collections
            .get(&source)
            .map(String::as_str)
            .unwrap_or(source.as_str());
        self.root.join(dir)
    }

    fn load_record(&self, collection_dir: &Path, path: &Path) -> Result<Option<RawRecord>> {
        let content = fs::read_to_string(path).map_err(|e| GleanError::io(path, e))?;
        let (data, body) = parse_markdown(path, &content)?;

        if !data.is_published() {
            debug!(path = %path.display(), "skipping unpublished record");
            return Ok(None);
        }

        let slug = match data.slug.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.trim_matches('/').to_string(),
            _ => slug_from_path(collection_dir, path),
        };

        Ok(Some(RawRecord {
            slug,
            data,
            body: body.to_string(),
        }))
    }
}

impl ContentRepository for FsRepository {
    fn fetch_published(&self, source: SourceType) -> Result<Vec<RawRecord>> {
        let collection_dir = self.collection_path(source);
        if !collection_dir.is_dir() {
            return Err(GleanError::MissingCollection {
                source_type: source,
                path: collection_dir,
            });
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&collection_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(source = %source, error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_content_file(entry.path()) {
                continue;
            }

            match self.load_record(&collection_dir, entry.path()) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => warn!(source = %source, error = %e, "skipping record"),
            }
        }

        debug!(source = %source, count = records.len(), "loaded collection");
        Ok(records)
    }
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Split a markdown file into its YAML frontmatter and body.
///
/// Returns `None` when the file does not open with a `---` fence or the fence
/// is never closed; the whole content is then body.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end_matches(['\r', '\n']);
        if fence == "---" || fence == "..." {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter and return it with the body.
pub fn parse_markdown<'a>(path: &Path, content: &'a str) -> Result<(Frontmatter, &'a str)> {
    let Some((yaml, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content));
    };

    if yaml.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }

    let data = serde_yaml::from_str::<Frontmatter>(yaml)
        .map_err(|e| GleanError::frontmatter(path, e.to_string()))?;
    Ok((data, body))
}

/// Derive a slug from a content path relative to its collection directory.
///
/// `blog/2024/Signal Theory.md` → `2024/signal-theory`; `notes/lab/index.md` → `lab`.
pub fn slug_from_path(collection_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(collection_dir).unwrap_or(path);
    let without_ext = relative.with_extension("");

    let mut segments: Vec<String> = without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join("-"))
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    segments.join("/")
}
