// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Content repositories: where raw records come from.
//!
//! The builder only ever asks one question: "give me the published records of
//! this source type". Anything that can answer it implements
//! [`ContentRepository`]. The filesystem layout used by the CLI lives in
//! [`fs`]; [`cache`] wraps any repository with an explicitly owned,
//! explicitly invalidated memo.

pub mod cache;
pub mod fs;

pub use cache::CachedRepository;
pub use fs::{parse_markdown, slug_from_path, split_frontmatter, FsRepository};

use crate::error::Result;
use crate::types::{RawRecord, SourceType};

/// Supplier of raw content records.
///
/// Implementations return only records whose status is `published`, in a
/// stable order. Fetches for different source types must be independent: the
/// assembler runs them concurrently and tolerates any one of them failing.
pub trait ContentRepository: Send + Sync {
    fn fetch_published(&self, source: SourceType) -> Result<Vec<RawRecord>>;
}

impl<T: ContentRepository + ?Sized> ContentRepository for &T {
    fn fetch_published(&self, source: SourceType) -> Result<Vec<RawRecord>> {
        (**self).fetch_published(source)
    }
}

impl<T: ContentRepository + ?Sized> ContentRepository for Box<T> {
    fn fetch_published(&self, source: SourceType) -> Result<Vec<RawRecord>> {
        (**self).fetch_published(source)
    }
}
