//! Artifact build pipeline.
//!
//! `repository → corpus (documents, sorted) → inverted index → JSON artifact`.
//! [`build_artifact`] is the pure part; [`run_build`] adds the filesystem on
//! both ends and reports what it wrote.

pub mod corpus;
pub mod document;
pub mod manifest;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{GleanError, Result};
use crate::inverted::build_inverted_index;
use crate::repository::{CachedRepository, ContentRepository, FsRepository};
use crate::types::{Document, InvertedIndex, SearchArtifact, SourceType};
use crate::utils::DEFAULT_EXCERPT_LEN;

pub use corpus::*;
pub use document::*;
pub use manifest::*;

/// `Cache-Control` to serve the artifact with. Rebuilding is cheap and a
/// briefly stale index is harmless.
pub const CACHE_CONTROL: &str = "public, max-age=300, s-maxage=3600, stale-while-revalidate=86400";

/// Knobs for turning records into documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Body excerpt bound, in characters.
    pub excerpt_len: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            excerpt_len: DEFAULT_EXCERPT_LEN,
        }
    }
}

/// Build the artifact, stamped with the current time.
pub fn build_artifact<R>(repo: &R, options: &BuildOptions) -> SearchArtifact
where
    R: ContentRepository + ?Sized,
{
    build_artifact_at(repo, options, Utc::now())
}

/// Build the artifact with an explicit `generatedAt`.
pub fn build_artifact_at<R>(
    repo: &R,
    options: &BuildOptions,
    generated_at: DateTime<Utc>,
) -> SearchArtifact
where
    R: ContentRepository + ?Sized,
{
    let documents = assemble(repo, options);
    artifact_from_documents(documents, generated_at)
}

/// Index an already sorted document array.
pub fn artifact_from_documents(
    documents: Vec<Document>,
    generated_at: DateTime<Utc>,
) -> SearchArtifact {
    let index = build_inverted_index(&documents);
    SearchArtifact {
        generated_at: format_iso(generated_at),
        documents,
        index,
    }
}

/// CRC32 over the serialized `documents` and `index`, ignoring `generatedAt`.
///
/// Two builds over an unchanged corpus have the same fingerprint.
pub fn content_fingerprint(artifact: &SearchArtifact) -> Result<u32> {
    #[derive(Serialize)]
    struct Content<'a> {
        documents: &'a [Document],
        index: &'a InvertedIndex,
    }

    let bytes = serde_json::to_vec(&Content {
        documents: &artifact.documents,
        index: &artifact.index,
    })?;
    Ok(crc32fast::hash(&bytes))
}

/// Serialize the artifact as it is written to disk.
pub fn encode_artifact(artifact: &SearchArtifact, pretty: bool) -> Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(artifact)?
    } else {
        serde_json::to_vec(artifact)?
    };
    Ok(bytes)
}

/// Load a previously written artifact.
pub fn read_artifact(path: &Path) -> Result<SearchArtifact> {
    let bytes = fs::read(path).map_err(|e| GleanError::io(path, e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| GleanError::Artifact(format!("{}: {}", path.display(), e)))
}

/// Brotli-compressed size, the size clients will actually download.
pub fn compressed_size(bytes: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder
            .write_all(bytes)
            .map_err(|e| GleanError::Artifact(format!("brotli compression failed: {}", e)))?;
    }
    Ok(compressed.len())
}

/// What a build produced.
#[derive(Clone, Debug)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub document_count: usize,
    pub per_source: BTreeMap<SourceType, usize>,
    pub key_count: usize,
    pub posting_count: usize,
    pub bytes: usize,
    pub compressed_bytes: usize,
    pub fingerprint: u32,
}

impl BuildSummary {
    fn from_artifact(
        artifact: &SearchArtifact,
        output_path: PathBuf,
        bytes: usize,
        compressed_bytes: usize,
        fingerprint: u32,
    ) -> Self {
        Self {
            output_path,
            document_count: artifact.documents.len(),
            per_source: count_per_source(&artifact.documents),
            key_count: artifact.index.key_count(),
            posting_count: artifact.index.posting_count(),
            bytes,
            compressed_bytes,
            fingerprint,
        }
    }
}

/// Documents per source type, every source present (possibly 0).
pub fn count_per_source(documents: &[Document]) -> BTreeMap<SourceType, usize> {
    let mut counts: BTreeMap<SourceType, usize> =
        SourceType::ALL.into_iter().map(|s| (s, 0)).collect();
    for doc in documents {
        *counts.entry(doc.source_type).or_insert(0) += 1;
    }
    counts
}

/// Create a progress style for the fetch progress bar
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Read the content directory, build, and write the artifact.
pub fn run_build(config: &BuildConfig) -> Result<BuildSummary> {
    let repo = config
        .collections
        .iter()
        .fold(FsRepository::new(&config.content_dir), |repo, (source, dir)| {
            repo.with_collection_dir(*source, dir.clone())
        });
    let repo = CachedRepository::new(repo);
    let options = BuildOptions {
        excerpt_len: config.excerpt_len,
    };

    #[cfg(feature = "parallel")]
    let progress = {
        let pb = ProgressBar::new(SourceType::ALL.len() as u64);
        pb.set_style(create_progress_style());
        pb.set_prefix("Loading");
        pb.set_message("collections...");
        pb
    };

    let documents = assemble_with(&repo, &options, |_source, _count| {
        #[cfg(feature = "parallel")]
        {
            progress.inc(1);
            progress.set_message(format!("{} ({} records)", _source, _count));
        }
    });

    #[cfg(feature = "parallel")]
    progress.finish_with_message(format!("loaded {} documents", documents.len()));

    if documents.is_empty() {
        warn!(
            content_dir = %config.content_dir.display(),
            "no published documents; writing empty artifact"
        );
    }

    let artifact = artifact_from_documents(documents, Utc::now());
    let bytes = encode_artifact(&artifact, config.pretty)?;
    let fingerprint = content_fingerprint(&artifact)?;
    let compressed_bytes = compressed_size(&bytes)?;

    fs::create_dir_all(&config.output_dir).map_err(|e| GleanError::io(&config.output_dir, e))?;
    let output_path = config.output_path();
    fs::write(&output_path, &bytes).map_err(|e| GleanError::io(&output_path, e))?;

    let summary = BuildSummary::from_artifact(
        &artifact,
        output_path,
        bytes.len(),
        compressed_bytes,
        fingerprint,
    );

    info!(
        path = %summary.output_path.display(),
        documents = summary.document_count,
        keys = summary.key_count,
        bytes = summary.bytes,
        fingerprint = %format!("{:08x}", summary.fingerprint),
        "wrote search artifact"
    );

    Ok(summary)
}
