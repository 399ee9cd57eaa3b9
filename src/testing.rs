//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::{GleanError, Result};
use crate::repository::ContentRepository;
use crate::types::{DateValue, Document, Frontmatter, RawRecord, SourceType};

/// In-memory content repository.
///
/// Applies the same published filter as the filesystem repository, can be told
/// to fail specific source types, and counts fetches so cache behavior is
/// observable.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: BTreeMap<SourceType, Vec<RawRecord>>,
    failing: BTreeSet<SourceType>,
    fetches: Mutex<HashMap<SourceType, usize>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, source: SourceType, record: RawRecord) -> Self {
        self.records.entry(source).or_default().push(record);
        self
    }

    pub fn with_records(
        mut self,
        source: SourceType,
        records: impl IntoIterator<Item = RawRecord>,
    ) -> Self {
        self.records.entry(source).or_default().extend(records);
        self
    }

    /// Make every fetch of `source` fail.
    pub fn failing(mut self, source: SourceType) -> Self {
        self.failing.insert(source);
        self
    }

    pub fn fetch_count(&self, source: SourceType) -> usize {
        self.fetches.lock().get(&source).copied().unwrap_or(0)
    }
}

impl ContentRepository for MemoryRepository {
    fn fetch_published(&self, source: SourceType) -> Result<Vec<RawRecord>> {
        *self.fetches.lock().entry(source).or_insert(0) += 1;

        if self.failing.contains(&source) {
            return Err(GleanError::MissingCollection {
                source_type: source,
                path: PathBuf::from("<memory>"),
            });
        }

        Ok(self
            .records
            .get(&source)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.data.is_published())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Create a published record with a title and publish date.
pub fn make_record(slug: &str, title: &str, published_at: &str) -> RawRecord {
    RawRecord {
        slug: slug.to_string(),
        data: Frontmatter {
            title: Some(title.to_string()),
            status: Some("published".to_string()),
            published_at: Some(DateValue::Text(published_at.to_string())),
            ..Default::default()
        },
        body: String::new(),
    }
}

/// Create a published record with tags and a body.
pub fn make_record_with_body(
    slug: &str,
    title: &str,
    published_at: &str,
    tags: &[&str],
    body: &str,
) -> RawRecord {
    let mut record = make_record(slug, title, published_at);
    record.data.tags = tags.iter().map(|t| t.to_string()).collect();
    record.body = body.to_string();
    record
}

/// Create a document with already-normalized text.
pub fn make_document(source: SourceType, slug: &str, text: &str) -> Document {
    Document {
        id: format!("{}:{}", source, slug),
        source_type: source,
        title: slug.to_string(),
        description: None,
        tags: vec![],
        date: "1970-01-01T00:00:00.000Z".to_string(),
        url: source.url(slug),
        text: text.to_string(),
    }
}
