// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization for indexing.
//!
//! Two entry points: [`normalize`] for the whole text blob, [`excerpt`] for the
//! markdown body before it joins the blob. Both are total; missing input is an
//! empty string upstream.

use std::sync::LazyLock;

use regex::Regex;

/// Default body excerpt length, in characters.
pub const DEFAULT_EXCERPT_LEN: usize = 2000;

/// Fenced code blocks, spanning lines, shortest match.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// Inline markup tags (`<br>`, `<Component prop="x" />`, ...).
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Lowercase, collapse whitespace runs to a single space, and trim.
///
/// - "  Signal\n\tTheory " → "signal theory"
pub fn normalize(value: &str) -> String {
    collapse_whitespace(&value.to_lowercase())
}

/// Strip code fences and markup, collapse whitespace, then cut to `max_len` chars.
///
/// The cut is a hard character cut, not word-aware: a prefix index tolerates a
/// word sliced in half, and the bound keeps long posts from dominating the
/// artifact size. Case is preserved; the blob is lowercased later.
pub fn excerpt(value: &str, max_len: usize) -> String {
    let without_code = CODE_FENCE.replace_all(value, " ");
    let without_tags = MARKUP_TAG.replace_all(&without_code, " ");
    let mut cleaned = collapse_whitespace(&without_tags);
    truncate_chars(&mut cleaned, max_len);
    cleaned
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` Unicode scalar values.
fn truncate_chars(value: &mut String, max_chars: usize) {
    if let Some((byte_idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(byte_idx);
    }
}

/// Character count (not byte length) of a string.
#[inline]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
