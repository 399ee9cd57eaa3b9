// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus assembly: fetch every source, normalize, sort by recency.
//!
//! The four fetches are independent, so they fan out on the rayon pool and fan
//! back in with source order preserved (`collect` on an indexed parallel
//! iterator keeps positions). A fetch that fails contributes nothing; the build
//! carries on with whatever the other sources returned.
//!
//! Everything after the fan-in is one synchronous pass over owned data.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

use super::document::build_document;
use super::BuildOptions;
use crate::repository::ContentRepository;
use crate::types::{Document, RawRecord, SourceType};

/// Fetch every source type, substituting an empty list for failures.
///
/// Results come back in [`SourceType::ALL`] order. `on_fetched` is called once
/// per source with the number of records it produced (0 on failure), possibly
/// from several threads at once.
pub fn fetch_all<R, F>(repo: &R, on_fetched: F) -> Vec<(SourceType, Vec<RawRecord>)>
where
    R: ContentRepository + ?Sized,
    F: Fn(SourceType, usize) + Sync,
{
    let fetch = |source: &SourceType| {
        let records = fetch_or_empty(repo, *source);
        on_fetched(*source, records.len());
        (*source, records)
    };

    #[cfg(feature = "parallel")]
    let fetched = SourceType::ALL.par_iter().map(fetch).collect();

    #[cfg(not(feature = "parallel"))]
    let fetched = SourceType::ALL.iter().map(fetch).collect();

    fetched
}

fn fetch_or_empty<R>(repo: &R, source: SourceType) -> Vec<RawRecord>
where
    R: ContentRepository + ?Sized,
{
    match repo.fetch_published(source) {
        Ok(records) => {
            debug!(source = %source, count = records.len(), "fetched source");
            records
        }
        Err(e) => {
            warn!(source = %source, error = %e, "source unavailable, indexing without it");
            Vec::new()
        }
    }
}

/// Fetch, normalize and sort the whole corpus.
pub fn assemble<R>(repo: &R, options: &BuildOptions) -> Vec<Document>
where
    R: ContentRepository + ?Sized,
{
    assemble_with(repo, options, |_, _| {})
}

/// [`assemble`] with a per-source progress callback.
pub fn assemble_with<R, F>(repo: &R, options: &BuildOptions, on_fetched: F) -> Vec<Document>
where
    R: ContentRepository + ?Sized,
    F: Fn(SourceType, usize) + Sync,
{
    let fetched = fetch_all(repo, on_fetched);

    let mut documents: Vec<Document> = fetched
        .iter()
        .flat_map(|(source, records)| {
            records
                .iter()
                .map(move |record| build_document(*source, record, options.excerpt_len))
        })
        .collect();

    sort_by_recency(&mut documents);
    documents
}

/// Newest first. Stable: equal dates keep their concatenation order.
///
/// Dates are fixed-width ISO-8601 strings, so byte order is chronological.
pub fn sort_by_recency(documents: &mut [Document]) {
    documents.sort_by(|a, b| b.date.cmp(&a.date));
}
