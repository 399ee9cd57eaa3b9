// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use glean::build::{
    compressed_size, content_fingerprint, count_per_source, encode_artifact, read_artifact,
    run_build, BuildConfig, BuildSummary, ConfigOverrides, CACHE_CONTROL,
};
use glean::{lookup, verify_artifact, GleanError, SearchArtifact};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

/// Log filter env var. Defaults to `warn` so a clean build prints only its summary.
const LOG_ENV: &str = "GLEAN_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            content,
            output,
            output_file,
            excerpt_length,
            pretty,
        } => run_index(
            &content,
            &output,
            ConfigOverrides {
                excerpt_len: excerpt_length,
                output_file,
                pretty,
            },
        ),
        Commands::Inspect { file } => run_inspect(Path::new(&file)),
        Commands::Lookup { file, key, limit } => run_lookup(Path::new(&file), &key, limit),
    };

    if let Err(e) = result {
        eprintln!("{} {}", themed(RED, &[BOLD], "error:"), e);
        process::exit(1);
    }
}

fn run_index(content: &str, output: &str, overrides: ConfigOverrides) -> glean::Result<()> {
    let config = BuildConfig::resolve(content, output, overrides)?;
    let summary = run_build(&config)?;
    print_build_summary(&summary);
    Ok(())
}

fn print_build_summary(summary: &BuildSummary) {
    let path = summary.output_path.display().to_string();

    println!();
    title_box("SEARCH ARTIFACT");
    section_top("OUTPUT");
    row(&format!("  {}", truncate_path(&path, BOX_WIDTH - 4)));
    row(&format!(
        "  {} raw, {} brotli ({})",
        format_size(summary.bytes),
        format_size(summary.compressed_bytes),
        ratio_colored(summary.bytes, summary.compressed_bytes)
    ));
    row(&format!(
        "  fingerprint {}",
        themed(CYAN, &[], &format!("{:08x}", summary.fingerprint))
    ));
    row(&format!(
        "  {}",
        themed(GRAY, &[], &format!("Cache-Control: {}", CACHE_CONTROL))
    ));

    section_mid("DOCUMENTS");
    for (source, count) in &summary.per_source {
        row(&format!(
            "  {} {}",
            source_label(*source),
            pad_left(&count.to_string(), 6)
        ));
    }
    row(&format!(
        "  {} {}",
        pad_right("total", 8),
        pad_left(&themed(CYAN, &[BOLD], &summary.document_count.to_string()), 6)
    ));

    section_mid("INDEX");
    row(&format!("  {} keys", pad_left(&summary.key_count.to_string(), 8)));
    row(&format!(
        "  {} postings",
        pad_left(&summary.posting_count.to_string(), 8)
    ));
    section_bot();
    println!();
}

fn run_inspect(path: &Path) -> glean::Result<()> {
    let artifact = read_artifact(path)?;
    let raw = encode_artifact(&artifact, false)?;
    let compressed = compressed_size(&raw)?;
    let fingerprint = content_fingerprint(&artifact)?;

    println!();
    title_box("ARTIFACT INSPECTION");
    section_top("FILE");
    row(&format!(
        "  {}",
        truncate_path(&path.display().to_string(), BOX_WIDTH - 4)
    ));
    row(&format!("  generated {}", artifact.generated_at));
    row(&format!(
        "  {} compact, {} brotli, fingerprint {:08x}",
        format_size(raw.len()),
        format_size(compressed),
        fingerprint
    ));

    section_mid("DOCUMENTS");
    for (source, count) in count_per_source(&artifact.documents) {
        row(&format!(
            "  {} {}",
            source_label(source),
            pad_left(&count.to_string(), 6)
        ));
    }
    if let (Some(newest), Some(oldest)) = (artifact.documents.first(), artifact.documents.last())
    {
        row(&format!("  newest {}", newest.date));
        row(&format!("  oldest {}", oldest.date));
    }

    section_mid("INDEX");
    print_index_stats(&artifact);

    let verdict = verify_artifact(&artifact);
    section_mid("INVARIANTS");
    match &verdict {
        Ok(()) => row(&format!("  {} all checks hold", status_badge(true))),
        Err(e) => row(&format!(
            "  {} {}",
            status_badge(false),
            truncate_text(&e.to_string(), BOX_WIDTH - 8)
        )),
    }
    section_bot();
    println!();

    verdict.map_err(|e| GleanError::Artifact(format!("{}: {}", path.display(), e)))
}

fn print_index_stats(artifact: &SearchArtifact) {
    let index = &artifact.index;
    row(&format!("  {} keys", pad_left(&index.key_count().to_string(), 8)));
    row(&format!(
        "  {} postings",
        pad_left(&index.posting_count().to_string(), 8)
    ));

    let mut widest: Vec<(&String, usize)> = index
        .postings
        .iter()
        .map(|(key, list)| (key, list.len()))
        .collect();
    widest.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    if !widest.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], "widest keys:")));
    }
    for (key, len) in widest.into_iter().take(5) {
        row(&format!(
            "    {} {}",
            pad_right(&truncate_text(key, 24), 24),
            pad_left(&len.to_string(), 6)
        ));
    }
}

fn run_lookup(path: &Path, query: &str, limit: usize) -> glean::Result<()> {
    let artifact = read_artifact(path)?;

    let Some((key, list)) = lookup(&artifact.index, query) else {
        println!("{} no documents under '{}'", themed(YELLOW, &[], "∅"), query);
        return Ok(());
    };

    println!(
        "{} {} document(s) under '{}'",
        themed(GREEN, &[BOLD], "→"),
        list.len(),
        themed(CYAN, &[BOLD], &key)
    );

    for &ordinal in list.as_slice().iter().take(limit) {
        let doc = artifact.documents.get(ordinal as usize).ok_or_else(|| {
            GleanError::Artifact(format!(
                "key '{}' posts ordinal {} past the end of documents",
                key, ordinal
            ))
        })?;
        println!(
            "  {} {} {}  {}",
            pad_left(&ordinal.to_string(), 4),
            source_label(doc.source_type),
            truncate_text(&doc.title, 40),
            themed(GRAY, &[], &doc.url)
        );
    }

    if list.len() > limit {
        println!("  {}", themed(GRAY, &[], &format!("... {} more", list.len() - limit)));
    }
    Ok(())
}
