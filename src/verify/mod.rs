// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact verification.
//!
//! A built artifact satisfies these by construction; a loaded one (from disk,
//! from an older build, edited by hand) might not. [`verify_artifact`] checks
//! the structural invariants first and then rebuilds the index from the
//! documents, which covers prefix completeness and derivability in one
//! comparison.

mod types;

pub use types::InvariantError;

use crate::inverted::build_inverted_index;
use crate::types::{Document, InvertedIndex, SearchArtifact};

/// Check every invariant, returning the first violation.
pub fn verify_artifact(artifact: &SearchArtifact) -> Result<(), InvariantError> {
    check_documents_sorted(&artifact.documents)?;
    check_postings_well_formed(&artifact.index, artifact.documents.len())?;
    check_index_derivable(&artifact.index, &artifact.documents)
}

/// `documents[i].date >= documents[i + 1].date` for every adjacent pair.
pub fn check_documents_sorted(documents: &[Document]) -> Result<(), InvariantError> {
    match documents.windows(2).position(|pair| pair[0].date < pair[1].date) {
        Some(position) => Err(InvariantError::UnsortedDocuments { position }),
        None => Ok(()),
    }
}

/// Non-empty, strictly increasing, in-range posting lists.
pub fn check_postings_well_formed(
    index: &InvertedIndex,
    doc_count: usize,
) -> Result<(), InvariantError> {
    for (key, list) in &index.postings {
        let ordinals = list.as_slice();

        if ordinals.is_empty() {
            return Err(InvariantError::EmptyPostingList { key: key.clone() });
        }

        if let Some(position) = ordinals.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(InvariantError::UnsortedPostingList {
                key: key.clone(),
                position: position + 1,
            });
        }

        if let Some(&ordinal) = ordinals.iter().find(|&&o| o as usize >= doc_count) {
            return Err(InvariantError::OrdinalOutOfRange {
                key: key.clone(),
                ordinal,
                doc_count,
            });
        }
    }
    Ok(())
}

/// The index equals a fresh build over `documents`.
pub fn check_index_derivable(
    index: &InvertedIndex,
    documents: &[Document],
) -> Result<(), InvariantError> {
    let expected = build_inverted_index(documents);

    for (key, list) in &expected.postings {
        if index.get(key) != Some(list) {
            return Err(InvariantError::IncompleteIndex { key: key.clone() });
        }
    }

    if let Some(key) = index
        .postings
        .keys()
        .find(|key| !expected.postings.contains_key(*key))
    {
        return Err(InvariantError::UnexpectedKey { key: key.clone() });
    }

    Ok(())
}
