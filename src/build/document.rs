// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Raw record → [`Document`].
//!
//! A missing or malformed value becomes the field's zero value (empty string,
//! empty list, epoch date) rather than rejecting the record. Optional fields resolve through explicit fallback
//! chains evaluated left to right.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::types::{DateValue, Document, Frontmatter, RawRecord, SourceType};
use crate::utils::{excerpt, normalize};

/// Date used when neither the publish date nor the legacy date parses.
pub const EPOCH_ISO: &str = "1970-01-01T00:00:00.000Z";

/// Naive datetime layouts accepted without an offset (read as UTC).
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts beyond RFC 3339 (YAML-style timestamps).
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// First candidate that is present and non-empty.
pub fn first_present<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

/// Summary, then legacy description.
pub fn description_chain(data: &Frontmatter) -> [Option<&str>; 2] {
    [data.summary.as_deref(), data.description.as_deref()]
}

/// Publish timestamp, then legacy date.
pub fn date_chain(data: &Frontmatter) -> [Option<&DateValue>; 2] {
    [data.published_at.as_ref(), data.date.as_ref()]
}

/// Resolve the document date through [`date_chain`], falling back to the epoch.
pub fn resolve_date(data: &Frontmatter) -> String {
    date_chain(data)
        .into_iter()
        .flatten()
        .find_map(parse_date)
        .map(format_iso)
        .unwrap_or_else(|| EPOCH_ISO.to_string())
}

/// Parse a date-ish value into an instant. Invalid values are `None`.
pub fn parse_date(value: &DateValue) -> Option<DateTime<Utc>> {
    let parsed = match value {
        DateValue::Integer(millis) => DateTime::from_timestamp_millis(*millis),
        DateValue::Float(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        DateValue::Float(_) | DateValue::Invalid(_) => None,
        DateValue::Text(text) => parse_date_text(text.trim()),
    }?;

    // Outside 0000..=9999 the ISO form stops being fixed-width, which would
    // break string-ordered sorting.
    (0..=9999).contains(&parsed.year()).then_some(parsed)
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|dt| dt.and_utc())
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a [`Document`] from one repository record.
///
/// The index blob is `title`, description (opt-in sources only), the source's
/// extra field, the joined tags, and the body excerpt, newline-joined and then
/// normalized. Normalization runs after concatenation, so the excerpt bound
/// applies to the body alone.
pub fn build_document(source: SourceType, record: &RawRecord, excerpt_len: usize) -> Document {
    let data = &record.data;

    let title = data.title.clone().unwrap_or_default();
    let description = if source.includes_summary() {
        first_present(description_chain(data)).map(str::to_string)
    } else {
        None
    };
    let extra = source.extra_text(data).unwrap_or_default();
    let tags = data.tags.clone();
    let joined_tags = tags.join(" ");
    let body = excerpt(&record.body, excerpt_len);

    let blob = [
        title.as_str(),
        description.as_deref().unwrap_or_default(),
        extra,
        joined_tags.as_str(),
        body.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    Document {
        id: format!("{}:{}", source, record.slug),
        source_type: source,
        title,
        description,
        tags,
        date: resolve_date(data),
        url: source.url(&record.slug),
        text: normalize(&blob),
    }
}
