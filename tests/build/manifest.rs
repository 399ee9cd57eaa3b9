//! Tests for site manifest resolution.

use glean::build::{BuildConfig, ConfigOverrides, SiteManifest, DEFAULT_OUTPUT_FILE};
use glean::{GleanError, SourceType, DEFAULT_EXCERPT_LEN};

use crate::common::{build_fixture, ids, postings, CUSTOM_LAYOUT_DIR, INVALID_MANIFEST_DIR, SITE_DIR};

#[test]
fn test_site_without_manifest_uses_defaults() {
    let config = BuildConfig::resolve(SITE_DIR, "out", ConfigOverrides::default()).unwrap();
    assert_eq!(config.output_file, DEFAULT_OUTPUT_FILE);
    assert_eq!(config.excerpt_len, DEFAULT_EXCERPT_LEN);
    assert!(!config.pretty);
    assert!(config.collections.is_empty());
}

#[test]
fn test_manifest_remaps_collections_and_output() {
    let (_temp, summary, artifact) = build_fixture(CUSTOM_LAYOUT_DIR, ConfigOverrides::default());

    assert!(summary.output_path.ends_with("dist/search.json"));
    assert_eq!(ids(&artifact.documents), vec!["blog:hello"]);
    assert_eq!(summary.per_source[&SourceType::Notes], 0);
}

#[test]
fn test_manifest_excerpt_length_bounds_body() {
    let (_temp, _summary, artifact) = build_fixture(CUSTOM_LAYOUT_DIR, ConfigOverrides::default());

    // excerptLength 12 keeps "abcdefghij k"; the lone "k" is too short to index
    assert_eq!(postings(&artifact, "abcdefghij"), vec![0]);
    assert!(postings(&artifact, "kl").is_empty());
}

#[test]
fn test_cli_excerpt_length_overrides_manifest() {
    let (_temp, _summary, artifact) = build_fixture(
        CUSTOM_LAYOUT_DIR,
        ConfigOverrides {
            excerpt_len: Some(100),
            ..Default::default()
        },
    );
    assert_eq!(postings(&artifact, "klmnopqrst"), vec![0]);
}

#[test]
fn test_invalid_manifest_fails_resolution() {
    let err = BuildConfig::resolve(INVALID_MANIFEST_DIR, "out", ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, GleanError::Manifest { .. }));
    assert!(err.to_string().contains("version 7"), "{}", err);
}

#[test]
fn test_manifest_collections_deserialize_by_source_name() {
    let manifest =
        SiteManifest::parse(r#"{"collections": {"notes": "garden", "projects": "work"}}"#)
            .unwrap();
    assert_eq!(manifest.collections[&SourceType::Notes], "garden");
    assert_eq!(manifest.collections[&SourceType::Projects], "work");
}

#[test]
fn test_invalid_output_override_is_rejected() {
    let err = BuildConfig::resolve(
        SITE_DIR,
        "out",
        ConfigOverrides {
            output_file: Some("nested/index.json".into()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, GleanError::Manifest { .. }));
}
