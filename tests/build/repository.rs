//! Tests for reading collections from disk.

use glean::repository::{CachedRepository, ContentRepository, FsRepository};
use glean::{GleanError, SourceType};

use crate::common::{CUSTOM_LAYOUT_DIR, SITE_DIR};

fn slugs(repo: &impl ContentRepository, source: SourceType) -> Vec<String> {
    repo.fetch_published(source)
        .unwrap()
        .into_iter()
        .map(|r| r.slug)
        .collect()
}

#[test]
fn test_fs_repository_reads_nested_and_mdx() {
    let repo = FsRepository::new(SITE_DIR);
    assert_eq!(
        slugs(&repo, SourceType::Blog),
        vec!["2023/year-in-review", "signal-theory"]
    );
    assert_eq!(slugs(&repo, SourceType::Projects), vec!["glean"]);
}

#[test]
fn test_fs_repository_skips_non_content_files() {
    let repo = FsRepository::new(SITE_DIR);
    assert_eq!(slugs(&repo, SourceType::Research), vec!["spectral-estimation"]);
}

#[test]
fn test_fs_repository_skips_malformed_frontmatter() {
    let repo = FsRepository::new(SITE_DIR);
    assert_eq!(slugs(&repo, SourceType::Notes), vec!["lab-2"]);
}

#[test]
fn test_fs_repository_body_follows_frontmatter() {
    let repo = FsRepository::new(SITE_DIR);
    let records = repo.fetch_published(SourceType::Research).unwrap();
    assert_eq!(records[0].body.trim(), "Averaged periodograms reduce variance.");
    assert_eq!(records[0].data.kind.as_deref(), Some("paper"));
}

#[test]
fn test_missing_collection_is_an_error() {
    let repo = FsRepository::new(CUSTOM_LAYOUT_DIR);
    let err = repo.fetch_published(SourceType::Notes).unwrap_err();
    assert!(matches!(
        err,
        GleanError::MissingCollection {
            source_type: SourceType::Notes,
            ..
        }
    ));
}

#[test]
fn test_collection_dir_override() {
    let repo = FsRepository::new(CUSTOM_LAYOUT_DIR).with_collection_dir(SourceType::Blog, "posts");
    assert_eq!(slugs(&repo, SourceType::Blog), vec!["hello"]);
}

#[test]
fn test_cached_fs_repository_serves_same_records() {
    let repo = CachedRepository::new(FsRepository::new(SITE_DIR));
    let first = slugs(&repo, SourceType::Blog);
    assert!(repo.is_cached(SourceType::Blog));
    assert_eq!(slugs(&repo, SourceType::Blog), first);

    repo.invalidate();
    assert!(!repo.is_cached(SourceType::Blog));
}
