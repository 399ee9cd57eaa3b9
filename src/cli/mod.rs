// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the glean command-line interface.
//!
//! Three subcommands: `index` to build the search artifact from a content
//! directory, `inspect` to summarize and verify a written artifact, and `lookup`
//! to resolve one index key against it the way a client would.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "glean",
    about = "Static search-index builder for content sites",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search artifact from a content directory
    Index {
        /// Content root containing blog/, notes/, projects/, research/ and an optional glean.json
        #[arg(short, long)]
        content: String,

        /// Output directory for the artifact
        #[arg(short, long)]
        output: String,

        /// Artifact file name (overrides glean.json)
        #[arg(long)]
        output_file: Option<String>,

        /// Maximum body excerpt length in characters (overrides glean.json)
        #[arg(long)]
        excerpt_length: Option<usize>,

        /// Pretty-print the JSON artifact
        #[arg(long)]
        pretty: bool,
    },

    /// Summarize a search artifact and check its invariants
    Inspect {
        /// Path to the artifact JSON
        file: String,
    },

    /// Resolve a query key against a search artifact
    Lookup {
        /// Path to the artifact JSON
        file: String,

        /// Query text; normalized before lookup
        key: String,

        /// Maximum number of documents to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}
