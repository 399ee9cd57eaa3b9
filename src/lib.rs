//! Static search-index builder for a content site.
//!
//! Reads the published entries of four content collections (blog, notes,
//! projects, research), normalizes each into a [`Document`], and emits one JSON
//! artifact: the documents sorted newest first plus an inverted index from every
//! token and token prefix to the documents containing it. A client downloads the
//! artifact once and searches it offline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ repository/  │────▶│ build/       │────▶│ inverted.rs  │
//! │ (RawRecord,  │     │ (document,   │     │ (prefix keys,│
//! │  Frontmatter)│     │  corpus)     │     │  postings)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │                    │
//!                             ▼                    ▼
//!                      ┌─────────────────────────────────┐
//!                      │ SearchArtifact (types.rs)       │
//!                      │ checked by verify/              │
//!                      └─────────────────────────────────┘
//! ```
//!
//! Text flows through [`normalize`] once, when the document is built. The
//! tokenizer and index builder only ever see normalized text.
//!
//! # Usage
//!
//! ```ignore
//! use glean::build::{build_artifact, BuildOptions};
//! use glean::repository::FsRepository;
//!
//! let repo = FsRepository::new("src/content");
//! let artifact = build_artifact(&repo, &BuildOptions::default());
//! glean::verify_artifact(&artifact)?;
//! ```

pub mod build;
pub mod error;
pub mod repository;
pub mod testing;
pub mod verify;

mod inverted;
mod tokenize;
mod types;
mod utils;

pub use error::{GleanError, Result};
pub use inverted::{
    build_inverted_index, index_keys, index_token, lookup, MAX_PREFIX_LEN, MIN_PREFIX_LEN,
};
pub use tokenize::{tokenize, MIN_TOKEN_LEN};
pub use types::{
    DateValue, Document, Frontmatter, InvertedIndex, Ordinal, PostingList, RawRecord,
    SearchArtifact, SourceType,
};
pub use utils::{char_len, excerpt, normalize, DEFAULT_EXCERPT_LEN};
pub use verify::{verify_artifact, InvariantError};
