// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization of normalized text.
//!
//! A token is a maximal run of non-space characters in already-normalized text.
//! No stemming, no stop words, no locale-aware segmentation: Korean, Latin and
//! code identifiers all split the same way.

use std::collections::BTreeSet;

use crate::utils::char_len;

/// Tokens shorter than this (in characters) are not indexed.
pub const MIN_TOKEN_LEN: usize = 2;

/// Split normalized text into its distinct indexable tokens.
///
/// Returns a set: multiplicity within a document is irrelevant to indexing, and
/// the sorted order keeps index construction deterministic.
pub fn tokenize(normalized: &str) -> BTreeSet<String> {
    normalized
        .split(' ')
        .filter(|token| char_len(token) >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
