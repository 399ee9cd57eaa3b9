// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search artifact.
//!
//! Raw records come in from a content repository ([`RawRecord`], [`Frontmatter`]),
//! get normalized into [`Document`]s, and end up in a [`SearchArtifact`] next to the
//! [`InvertedIndex`] that points back into them by ordinal.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Ordinal**: `ordinal < documents.len()`. The index never refers to a document by
//!   id or slug, only by its position in the final sorted array.
//!
//! - **PostingList**: strictly increasing, no repeats. A document that mentions a
//!   token five times still contributes one entry.
//!
//! - **Document order**: `documents[i].date >= documents[i + 1].date` as strings.
//!   The date format is fixed-width, so string order is chronological order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Position of a document in the final sorted document array.
pub type Ordinal = u32;

// =============================================================================
// SOURCE TYPES
// =============================================================================

/// Content category a document was drawn from.
///
/// Closed set: adding a category means adding a variant and deciding its
/// summary/extra-text behavior below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Blog,
    Notes,
    Projects,
    Research,
}

impl SourceType {
    /// All source types in concatenation order.
    ///
    /// This order breaks date ties in the final document array.
    pub const ALL: [SourceType; 4] = [
        SourceType::Blog,
        SourceType::Notes,
        SourceType::Projects,
        SourceType::Research,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Blog => "blog",
            SourceType::Notes => "notes",
            SourceType::Projects => "projects",
            SourceType::Research => "research",
        }
    }

    /// Whether the summary/description is exposed on the document and indexed.
    pub fn includes_summary(self) -> bool {
        matches!(self, SourceType::Blog | SourceType::Projects)
    }

    /// Source-specific text folded into the index blob.
    pub fn extra_text(self, data: &Frontmatter) -> Option<&str> {
        match self {
            SourceType::Projects => data.category.as_deref(),
            SourceType::Research => data.kind.as_deref(),
            SourceType::Blog | SourceType::Notes => None,
        }
    }

    /// Public page path for a record of this type.
    pub fn url(self, slug: &str) -> String {
        format!("/{}/{}/", self.as_str(), slug)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown source type '{}'", s))
    }
}

// =============================================================================
// RAW RECORDS
// =============================================================================

/// A date-ish frontmatter value.
///
/// CMS editors write empty strings, legacy posts carry bare dates, and some
/// tooling emits epoch milliseconds. Anything else is kept as `Invalid` so one
/// odd field never rejects the whole record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Invalid(IgnoredAny),
}

/// Frontmatter fields the builder reads. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    pub published_at: Option<DateValue>,
    pub updated_at: Option<DateValue>,
    /// Legacy publish date.
    pub date: Option<DateValue>,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Research kind (`reading`, `experiment`, ...).
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    /// Explicit slug override.
    #[serde(deserialize_with = "lenient_string")]
    pub slug: Option<String>,
}

impl Frontmatter {
    pub fn is_published(&self) -> bool {
        self.status.as_deref() == Some("published")
    }
}

/// One record handed over by a content repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub slug: String,
    pub data: Frontmatter,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_string(self) -> Option<String> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Integer(n) => Some(n.to_string()),
            Scalar::Float(n) => Some(n.to_string()),
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Other(_) => None,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.and_then(Scalar::into_string))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<Option<Scalar>>),
        One(Scalar),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(items)) => items
            .into_iter()
            .filter_map(|item| item.and_then(Scalar::into_string))
            .collect(),
        Some(Tags::One(scalar)) => scalar.into_string().into_iter().collect(),
        None => Vec::new(),
    })
}

// =============================================================================
// DOCUMENTS AND INDEX
// =============================================================================

/// One normalized, indexable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// `"<sourceType>:<slug>"`.
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYY-MM-DDTHH:MM:SS.sssZ`.
    pub date: String,
    pub url: String,
    /// Normalized text the index was built from.
    pub text: String,
}

/// Strictly increasing list of document ordinals for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingList(Vec<Ordinal>);

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an ordinal, keeping the list strictly increasing.
    ///
    /// Appending past the tail is O(1); a repeat of the tail is a no-op. An
    /// ordinal that arrives out of order falls back to a binary search so the
    /// list stays deduplicated no matter the insertion order.
    ///
    /// Returns `true` if the ordinal was not present.
    pub fn insert(&mut self, ordinal: Ordinal) -> bool {
        match self.0.last() {
            None => {
                self.0.push(ordinal);
                true
            }
            Some(&last) if ordinal > last => {
                self.0.push(ordinal);
                true
            }
            Some(&last) if ordinal == last => false,
            Some(_) => match self.0.binary_search(&ordinal) {
                Ok(_) => false,
                Err(pos) => {
                    self.0.insert(pos, ordinal);
                    true
                }
            },
        }
    }

    pub fn contains(&self, ordinal: Ordinal) -> bool {
        self.0.binary_search(&ordinal).is_ok()
    }

    pub fn as_slice(&self) -> &[Ordinal] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Ordinal>> for PostingList {
    /// Wrap an existing list as-is. Loaded artifacts go through
    /// [`crate::verify_artifact`] before anything trusts their order.
    fn from(ordinals: Vec<Ordinal>) -> Self {
        PostingList(ordinals)
    }
}

/// Token-or-prefix → posting list.
///
/// Keys are kept in a `BTreeMap` so serialization order is stable and two builds
/// over the same corpus produce identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    pub postings: BTreeMap<String, PostingList>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PostingList> {
        self.postings.get(key)
    }

    /// Number of keys (tokens and prefixes).
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Total entries across all posting lists.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(PostingList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// The emitted artifact: everything a client needs to search offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArtifact {
    pub generated_at: String,
    pub documents: Vec<Document>,
    pub index: InvertedIndex,
}
