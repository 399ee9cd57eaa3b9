// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! Every token gets a posting under its exact form and under each of its
//! prefixes from [`MIN_PREFIX_LEN`] up to [`MAX_PREFIX_LEN`] characters. A client
//! typing "fou" finds a ready-made list under `"fou"` with no runtime scan, at
//! the cost of up to 11 extra keys per distinct token.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: each posting list is strictly increasing
//! 2. **NO_DUPLICATE_DOC**: an ordinal appears at most once per key
//! 3. **ORDINAL_IN_RANGE**: every ordinal is `< documents.len()`
//! 4. **PREFIX_COMPLETE**: every prefix of length 2..=min(12, len) of every token
//!    posts the token's document

use crate::tokenize::{tokenize, MIN_TOKEN_LEN};
use crate::types::{Document, InvertedIndex, Ordinal, PostingList};
use crate::utils::normalize;
use crate::verify::check_postings_well_formed;

/// Shortest prefix key emitted.
pub const MIN_PREFIX_LEN: usize = MIN_TOKEN_LEN;

/// Longest prefix key emitted. Caps index growth on long tokens.
pub const MAX_PREFIX_LEN: usize = 12;

/// Build the inverted index over a sorted document array.
///
/// Ordinals are the documents' positions in `documents`, so this must run after
/// the final sort.
pub fn build_inverted_index(documents: &[Document]) -> InvertedIndex {
    let mut index = InvertedIndex::new();

    for (ordinal, doc) in documents.iter().enumerate() {
        let ordinal = ordinal as Ordinal;
        for token in tokenize(&doc.text) {
            index_token(&mut index, &token, ordinal);
        }
    }

    debug_assert!(
        check_postings_well_formed(&index, documents.len()).is_ok(),
        "index builder produced a malformed posting list"
    );

    index
}

/// Post `ordinal` under `token` and all of its prefix keys.
///
/// Tokens shorter than [`MIN_TOKEN_LEN`] are ignored.
pub fn index_token(index: &mut InvertedIndex, token: &str, ordinal: Ordinal) {
    for key in index_keys(token) {
        add_posting(index, key, ordinal);
    }
}

/// Every key a token is reachable under: prefixes of length
/// 2..=min(12, len) plus the token itself. Tokens of 12 characters or fewer are
/// their own longest prefix, so they appear once.
pub fn index_keys(token: &str) -> Vec<&str> {
    let boundaries: Vec<usize> = token
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(token.len()))
        .collect();

    if boundaries.len() < MIN_TOKEN_LEN {
        return Vec::new();
    }

    let max_prefix = boundaries.len().min(MAX_PREFIX_LEN);
    let mut keys: Vec<&str> = boundaries[MIN_PREFIX_LEN - 1..max_prefix]
        .iter()
        .map(|&end| &token[..end])
        .collect();

    if boundaries.len() > MAX_PREFIX_LEN {
        keys.push(token);
    }

    keys
}

/// Resolve query text to the key a client would look up.
///
/// The query is normalized; a single-token query longer than
/// [`MAX_PREFIX_LEN`] that was never indexed whole falls back to its capped
/// prefix, which over-approximates the matching documents. Returns the key
/// actually used alongside its postings.
pub fn lookup<'a>(index: &'a InvertedIndex, query: &str) -> Option<(String, &'a PostingList)> {
    let key = normalize(query);
    if let Some(list) = index.get(&key) {
        return Some((key, list));
    }

    let capped: String = key.chars().take(MAX_PREFIX_LEN).collect();
    if capped.len() < key.len() {
        return index.get(&capped).map(|list| (capped, list));
    }
    None
}

fn add_posting(index: &mut InvertedIndex, key: &str, ordinal: Ordinal) {
    match index.postings.get_mut(key) {
        Some(list) => {
            list.insert(ordinal);
        }
        None => {
            index
                .postings
                .entry(key.to_string())
                .or_default()
                .insert(ordinal);
        }
    }
}
