//! Two documents: an older blog post about Fourier transforms and a newer,
//! bodyless lab note. Small enough to check every key by hand.

use std::fs;

use glean::build::{build_artifact, BuildOptions, ConfigOverrides};
use glean::{SearchArtifact, SourceType};
use tempfile::TempDir;

use crate::common::{
    assert_artifact_well_formed, build_fixture, make_record, make_record_with_body, postings,
    MemoryRepository,
};

fn scenario_repo() -> MemoryRepository {
    MemoryRepository::new()
        .with_record(
            SourceType::Blog,
            make_record_with_body(
                "signal-theory",
                "Signal Theory",
                "2024-01-01",
                &["fourier"],
                "the fourier transform",
            ),
        )
        .with_record(SourceType::Notes, make_record("lab-2", "Lab 2", "2024-02-01"))
}

fn check_scenario(artifact: &SearchArtifact) {
    assert_artifact_well_formed(artifact);
    assert_eq!(artifact.documents.len(), 2);

    // later date first
    assert_eq!(artifact.documents[0].id, "notes:lab-2");
    assert_eq!(artifact.documents[1].id, "blog:signal-theory");

    assert_eq!(postings(artifact, "fourier"), vec![1]);
    assert_eq!(postings(artifact, "fo"), vec![1]);
    assert_eq!(postings(artifact, "lab"), vec![0]);

    for (key, list) in &artifact.index.postings {
        assert_eq!(list.len(), 1, "key '{}' posts both documents", key);
    }
}

#[test]
fn test_scenario_in_memory() {
    let artifact = build_artifact(&scenario_repo(), &BuildOptions::default());
    check_scenario(&artifact);
}

#[test]
fn test_scenario_document_text() {
    let artifact = build_artifact(&scenario_repo(), &BuildOptions::default());
    assert_eq!(artifact.documents[0].text, "lab 2");
    assert_eq!(
        artifact.documents[1].text,
        "signal theory fourier the fourier transform"
    );
    // "2" is a single character and never becomes a key
    assert!(postings(&artifact, "2").is_empty());
}

#[test]
fn test_scenario_from_disk() {
    let content = TempDir::new().unwrap();
    fs::create_dir_all(content.path().join("blog")).unwrap();
    fs::create_dir_all(content.path().join("notes")).unwrap();
    fs::write(
        content.path().join("blog/signal-theory.md"),
        "---\ntitle: Signal Theory\nstatus: published\npublishedAt: 2024-01-01\ntags: [fourier]\n---\nthe fourier transform\n",
    )
    .unwrap();
    fs::write(
        content.path().join("notes/lab-2.md"),
        "---\ntitle: Lab 2\nstatus: published\ndate: 2024-02-01\n---\n",
    )
    .unwrap();

    let (_temp, _summary, artifact) = build_fixture(content.path(), ConfigOverrides::default());
    check_scenario(&artifact);
}
