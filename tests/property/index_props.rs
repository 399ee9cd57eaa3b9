//! Index invariants over random corpora.

use std::collections::BTreeSet;

use glean::build::{build_artifact, BuildOptions};
use glean::{
    build_inverted_index, char_len, index_keys, tokenize, verify_artifact, Ordinal, PostingList,
    MAX_PREFIX_LEN, MIN_PREFIX_LEN,
};
use proptest::prelude::*;

use crate::strategies::{mixed_word_strategy, repo_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: every built artifact passes the full verifier.
    #[test]
    fn prop_built_artifact_verifies(repo in repo_strategy(12)) {
        let artifact = build_artifact(&repo, &BuildOptions::default());
        prop_assert!(verify_artifact(&artifact).is_ok(), "{:?}", verify_artifact(&artifact));
    }

    /// Property: documents are sorted newest first.
    #[test]
    fn prop_documents_sorted_by_date(repo in repo_strategy(12)) {
        let artifact = build_artifact(&repo, &BuildOptions::default());
        for pair in artifact.documents.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date, "{} < {}", pair[0].date, pair[1].date);
        }
    }

    /// Property: every prefix of every token posts the token's document.
    #[test]
    fn prop_prefix_completeness(repo in repo_strategy(8)) {
        let artifact = build_artifact(&repo, &BuildOptions::default());

        for (ordinal, doc) in artifact.documents.iter().enumerate() {
            let ordinal = ordinal as Ordinal;
            for token in tokenize(&doc.text) {
                let len = char_len(&token);
                for n in MIN_PREFIX_LEN..=len.min(MAX_PREFIX_LEN) {
                    let prefix: String = token.chars().take(n).collect();
                    let list = artifact.index.get(&prefix);
                    prop_assert!(
                        list.is_some_and(|l| l.contains(ordinal)),
                        "prefix '{}' of '{}' missing ordinal {}", prefix, token, ordinal
                    );
                }
                if len > MAX_PREFIX_LEN {
                    prop_assert!(artifact.index.get(&token).is_some_and(|l| l.contains(ordinal)));
                }
            }
        }
    }

    /// Property: posting lists are strictly increasing and in range.
    #[test]
    fn prop_postings_strict_and_in_range(repo in repo_strategy(12)) {
        let artifact = build_artifact(&repo, &BuildOptions::default());
        let doc_count = artifact.documents.len();

        for (key, list) in &artifact.index.postings {
            let ordinals = list.as_slice();
            prop_assert!(!ordinals.is_empty(), "empty list for '{}'", key);
            prop_assert!(ordinals.windows(2).all(|w| w[0] < w[1]), "'{}': {:?}", key, ordinals);
            prop_assert!(ordinals.iter().all(|&o| (o as usize) < doc_count));
        }
    }

    /// Property: keys are at least two characters long.
    #[test]
    fn prop_keys_respect_minimum_length(repo in repo_strategy(8)) {
        let artifact = build_artifact(&repo, &BuildOptions::default());
        for key in artifact.index.postings.keys() {
            prop_assert!(char_len(key) >= MIN_PREFIX_LEN, "short key '{}'", key);
        }
    }

    /// Property: the index depends only on document texts, in order.
    #[test]
    fn prop_index_rebuild_is_stable(repo in repo_strategy(8)) {
        let artifact = build_artifact(&repo, &BuildOptions::default());
        prop_assert_eq!(build_inverted_index(&artifact.documents), artifact.index);
    }

    /// Property: index_keys yields distinct prefixes of the token.
    #[test]
    fn prop_index_keys_are_distinct_prefixes(token in mixed_word_strategy()) {
        let token = token.to_lowercase();
        let keys = index_keys(&token);
        let distinct: BTreeSet<&str> = keys.iter().copied().collect();

        prop_assert_eq!(distinct.len(), keys.len());
        prop_assert!(keys.iter().all(|k| token.starts_with(k)));
        if char_len(&token) >= MIN_PREFIX_LEN {
            prop_assert!(keys.contains(&token.as_str()) || char_len(&token) <= MAX_PREFIX_LEN);
            prop_assert_eq!(
                keys.len(),
                char_len(&token).min(MAX_PREFIX_LEN) - 1 + usize::from(char_len(&token) > MAX_PREFIX_LEN)
            );
        } else {
            prop_assert!(keys.is_empty());
        }
    }

    /// Property: posting lists deduplicate and sort regardless of insert order.
    #[test]
    fn prop_posting_list_insert_any_order(ordinals in prop::collection::vec(0u32..50, 0..40)) {
        let mut list = PostingList::new();
        for &o in &ordinals {
            list.insert(o);
        }
        let expected: Vec<u32> = ordinals.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(list.as_slice(), expected.as_slice());
    }
}
