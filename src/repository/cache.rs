// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-build memo over a content repository.
//!
//! The cache is a value: whoever constructs it owns it, and nothing outlives
//! it. Two builds with two caches never observe each other, and a rebuild
//! after an edit is just [`CachedRepository::invalidate`] (or a fresh cache).
//! Failed fetches are not cached, so a transient error is retried next time.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use super::ContentRepository;
use crate::error::Result;
use crate::types::{RawRecord, SourceType};

pub struct CachedRepository<R> {
    inner: R,
    entries: Mutex<HashMap<SourceType, Arc<Vec<RawRecord>>>>,
}

impl<R: ContentRepository> CachedRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Drop every cached collection.
    pub fn invalidate(&self) {
        self.entries.lock().clear();
    }

    /// Drop one cached collection.
    pub fn invalidate_source(&self, source: SourceType) {
        self.entries.lock().remove(&source);
    }

    pub fn is_cached(&self, source: SourceType) -> bool {
        self.entries.lock().contains_key(&source)
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ContentRepository> ContentRepository for CachedRepository<R> {
    fn fetch_published(&self, source: SourceType) -> Result<Vec<RawRecord>> {
        if let Some(hit) = self.entries.lock().get(&source).cloned() {
            trace!(source = %source, "repository cache hit");
            return Ok(hit.as_ref().clone());
        }

        // The lock is not held across the fetch: concurrent misses on different
        // sources must not serialize.
        let records = Arc::new(self.inner.fetch_published(source)?);
        self.entries.lock().insert(source, Arc::clone(&records));
        Ok(records.as_ref().clone())
    }
}
