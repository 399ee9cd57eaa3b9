// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Invariant violations an artifact can exhibit.

use std::fmt;

use crate::types::Ordinal;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A posting refers past the end of the document array.
    OrdinalOutOfRange {
        key: String,
        ordinal: Ordinal,
        doc_count: usize,
    },
    /// A posting list is not strictly increasing.
    UnsortedPostingList { key: String, position: usize },
    /// A key with no postings.
    EmptyPostingList { key: String },
    /// Adjacent documents out of date order.
    UnsortedDocuments { position: usize },
    /// A key the documents produce is missing, or posts the wrong documents.
    IncompleteIndex { key: String },
    /// A key the documents do not produce.
    UnexpectedKey { key: String },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::OrdinalOutOfRange {
                key,
                ordinal,
                doc_count,
            } => write!(
                f,
                "key '{}' posts ordinal {} but there are {} documents",
                key, ordinal, doc_count
            ),
            InvariantError::UnsortedPostingList { key, position } => write!(
                f,
                "postings for '{}' not strictly increasing at position {}",
                key, position
            ),
            InvariantError::EmptyPostingList { key } => {
                write!(f, "key '{}' has an empty posting list", key)
            }
            InvariantError::UnsortedDocuments { position } => write!(
                f,
                "documents[{}] is older than documents[{}]",
                position,
                position + 1
            ),
            InvariantError::IncompleteIndex { key } => write!(
                f,
                "postings for '{}' differ from a rebuild over the documents",
                key
            ),
            InvariantError::UnexpectedKey { key } => {
                write!(f, "key '{}' is not derivable from the documents", key)
            }
        }
    }
}

impl std::error::Error for InvariantError {}
