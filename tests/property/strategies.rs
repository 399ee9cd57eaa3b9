//! Corpus generators.

use glean::{RawRecord, SourceType};
use proptest::prelude::*;

use crate::common::{make_record_with_body, MemoryRepository};

/// ASCII words, including some that are too short to index.
pub fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9]{1,16}").unwrap()
}

/// Words with diacritics and multi-byte characters.
pub fn unicode_word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "café".to_string(),
        "naïve".to_string(),
        "Résumé".to_string(),
        "tōkyō".to_string(),
        "푸리에".to_string(),
        "తెలుగు".to_string(),
        "Ünïcödé-wörd-that-is-long".to_string(),
    ])
}

pub fn mixed_word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![4 => word_strategy(), 1 => unicode_word_strategy()]
}

/// Whitespace-separated text with irregular spacing.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (mixed_word_strategy(), prop::sample::select(vec![" ", "  ", "\n", "\t", " \n "])),
        0..12,
    )
    .prop_map(|parts| parts.into_iter().map(|(w, sep)| format!("{}{}", w, sep)).collect())
}

/// Valid, invalid and empty publish dates.
pub fn date_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "2024-01-01".to_string(),
        "2024-01-01".to_string(),
        "2023-06-15T10:00:00Z".to_string(),
        "2023-06-15T15:30:00+05:30".to_string(),
        "1999-12-31".to_string(),
        "".to_string(),
        "not a date".to_string(),
        "2024-02-30".to_string(),
    ])
}

fn source_strategy() -> impl Strategy<Value = SourceType> {
    prop::sample::select(SourceType::ALL.to_vec())
}

fn record_parts() -> impl Strategy<Value = (SourceType, String, String, Vec<String>, String)> {
    (
        source_strategy(),
        text_strategy(),
        text_strategy(),
        prop::collection::vec(word_strategy(), 0..3),
        date_strategy(),
    )
}

/// A repository of up to `max` records spread over random sources.
pub fn repo_strategy(max: usize) -> impl Strategy<Value = MemoryRepository> {
    prop::collection::vec(record_parts(), 0..max).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .fold(MemoryRepository::new(), |repo, (i, (source, title, body, tags, date))| {
                let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                let record: RawRecord =
                    make_record_with_body(&format!("doc-{}", i), &title, &date, &tags, &body);
                repo.with_record(source, record)
            })
    })
}
