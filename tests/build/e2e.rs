//! End-to-end tests for the build workflow.

use std::fs;

use glean::build::{content_fingerprint, run_build, BuildConfig, ConfigOverrides};
use glean::SourceType;
use tempfile::TempDir;

use crate::common::{
    assert_artifact_well_formed, build_fixture, ids, ordinal_of, postings, SITE_DIR,
};

#[test]
fn test_run_build_e2e_site() {
    let (_temp, summary, artifact) = build_fixture(SITE_DIR, ConfigOverrides::default());

    assert!(summary.output_path.ends_with("dist/search-index.json"));
    assert_eq!(summary.document_count, 5);
    assert_eq!(
        ids(&artifact.documents),
        vec![
            "projects:glean",
            "notes:lab-2",
            "blog:signal-theory",
            "blog:2023/year-in-review",
            "research:spectral-estimation",
        ]
    );
    assert_artifact_well_formed(&artifact);
}

#[test]
fn test_summary_matches_artifact() {
    let (_temp, summary, artifact) = build_fixture(SITE_DIR, ConfigOverrides::default());

    assert_eq!(summary.per_source[&SourceType::Blog], 2);
    assert_eq!(summary.per_source[&SourceType::Notes], 1);
    assert_eq!(summary.per_source[&SourceType::Projects], 1);
    assert_eq!(summary.per_source[&SourceType::Research], 1);
    assert_eq!(summary.key_count, artifact.index.key_count());
    assert_eq!(summary.posting_count, artifact.index.posting_count());
    assert_eq!(summary.fingerprint, content_fingerprint(&artifact).unwrap());

    let on_disk = fs::metadata(&summary.output_path).unwrap().len() as usize;
    assert_eq!(summary.bytes, on_disk);
    assert!(summary.compressed_bytes > 0 && summary.compressed_bytes < summary.bytes);
}

#[test]
fn test_drafts_and_malformed_files_are_excluded() {
    let (_temp, _summary, artifact) = build_fixture(SITE_DIR, ConfigOverrides::default());

    assert!(!artifact.documents.iter().any(|d| d.title == "Unfinished Draft"));
    assert!(!artifact.documents.iter().any(|d| d.id == "notes:broken"));
    assert!(postings(&artifact, "unfinished").is_empty());
    assert!(postings(&artifact, "never").is_empty());
}

#[test]
fn test_document_fields_from_frontmatter() {
    let (_temp, _summary, artifact) = build_fixture(SITE_DIR, ConfigOverrides::default());
    let review = &artifact.documents[ordinal_of(&artifact, "blog:2023/year-in-review") as usize];

    assert_eq!(review.title, "Year in Review");
    assert_eq!(review.description.as_deref(), Some("Looking back at twelve months"));
    assert_eq!(review.tags, vec!["retrospective"]);
    assert_eq!(review.date, "2023-12-31T13:00:00.000Z");
    assert_eq!(review.url, "/blog/2023/year-in-review/");

    let project = &artifact.documents[ordinal_of(&artifact, "projects:glean") as usize];
    assert_eq!(project.date, "2024-03-15T09:00:00.000Z");
    assert_eq!(project.description.as_deref(), Some("Static search artifacts"));

    let research = &artifact.documents[ordinal_of(&artifact, "research:spectral-estimation") as usize];
    assert_eq!(research.description, None);
}

#[test]
fn test_index_covers_source_specific_text() {
    let (_temp, _summary, artifact) = build_fixture(SITE_DIR, ConfigOverrides::default());
    let project = ordinal_of(&artifact, "projects:glean");
    let research = ordinal_of(&artifact, "research:spectral-estimation");
    let review = ordinal_of(&artifact, "blog:2023/year-in-review");

    // project category and research type are indexed
    assert_eq!(postings(&artifact, "tooling"), vec![project]);
    assert_eq!(postings(&artifact, "paper"), vec![research]);

    // research descriptions are not
    assert!(postings(&artifact, "welch").is_empty());

    // code fences and markup are stripped from the body
    assert_eq!(postings(&artifact, "highlights"), vec![review]);
    assert!(postings(&artifact, "secretcodeword").is_empty());
    assert!(postings(&artifact, "em").is_empty());
}

#[test]
fn test_artifact_json_shape() {
    let (_temp, summary, _artifact) = build_fixture(SITE_DIR, ConfigOverrides::default());
    let raw = fs::read_to_string(&summary.output_path).unwrap();

    assert!(raw.starts_with(r#"{"generatedAt":""#), "{}", &raw[..40]);
    assert!(!raw.contains('\n'));

    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let documents = json["documents"].as_array().unwrap();
    assert_eq!(documents[0]["type"], "projects");
    assert_eq!(documents[0]["id"], "projects:glean");
    assert!(documents[4].get("description").is_none());
    assert!(json["index"]["fo"].is_array());
}

#[test]
fn test_run_build_pretty_and_renamed_output() {
    let (_temp, summary, artifact) = build_fixture(
        SITE_DIR,
        ConfigOverrides {
            output_file: Some("index.json".into()),
            pretty: true,
            ..Default::default()
        },
    );

    assert!(summary.output_path.ends_with("dist/index.json"));
    let raw = fs::read_to_string(&summary.output_path).unwrap();
    assert!(raw.contains("\n  \"documents\": ["));
    assert_eq!(artifact.documents.len(), 5);
}

#[test]
fn test_run_build_empty_content_dir() {
    let content = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config =
        BuildConfig::resolve(content.path(), output.path(), ConfigOverrides::default()).unwrap();

    let summary = run_build(&config).expect("missing collections are tolerated");

    assert_eq!(summary.document_count, 0);
    assert_eq!(summary.key_count, 0);
    let raw = fs::read_to_string(&summary.output_path).unwrap();
    assert!(raw.contains(r#""documents":[],"index":{}"#), "{}", raw);
}
