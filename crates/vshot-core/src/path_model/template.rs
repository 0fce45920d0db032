//! Filename template expansion against per-capture video metadata.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Template used when the user has not configured one.
pub const DEFAULT_TEMPLATE: &str = "{site}-{title}-{timestamp}";

/// Stand-in for a missing video title.
const FALLBACK_TITLE: &str = "video";

/// Every capture is saved as PNG.
const EXTENSION: &str = ".png";

/// Per-capture video metadata produced by the capture collaborator.
///
/// Every field is optional; expansion degrades to fixed fallbacks instead
/// of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataRecord {
    pub site: Option<String>,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub playlist: Option<String>,
    pub chapter: Option<String>,
    /// Playback position at capture time, e.g. `1m30s`.
    pub current_time: Option<String>,
}

/// Expands `template` into a concrete filename ending in `.png`.
///
/// Placeholders are substituted from `metadata` and the current wall clock;
/// unknown placeholders are left as-is (sanitization happens downstream).
/// The result can legitimately be just `.png` for pathological templates;
/// the normalizer owns the fallback for that case.
pub fn expand(template: &str, metadata: &MetadataRecord) -> String {
    expand_at(template, metadata, Local::now())
}

/// Expands a folder-organization pattern such as `{channel}/{date}`.
///
/// Slashes in the pattern are separators; each piece is expanded and
/// cleaned on its own, so a slash inside a metadata value can never add a
/// path level. Pieces that expand to nothing are dropped.
pub fn expand_folder_pattern(pattern: &str, metadata: &MetadataRecord) -> String {
    expand_folder_pattern_at(pattern, metadata, Local::now())
}

fn expand_at(template: &str, metadata: &MetadataRecord, now: DateTime<Local>) -> String {
    let template = if template.trim().is_empty() {
        DEFAULT_TEMPLATE
    } else {
        template
    };
    format!("{}{}", clean(&substitute(template, metadata, now)), EXTENSION)
}

fn expand_folder_pattern_at(
    pattern: &str,
    metadata: &MetadataRecord,
    now: DateTime<Local>,
) -> String {
    pattern
        .split('/')
        .map(|piece| clean(&substitute(piece, metadata, now)))
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Replaces every placeholder occurrence with its value; the table is
/// resolved once per call from the clock and the metadata record.
fn substitute(template: &str, metadata: &MetadataRecord, now: DateTime<Local>) -> String {
    let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
    let table = [
        ("{site}", or_empty(&metadata.site)),
        (
            "{title}",
            metadata
                .title
                .clone()
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        ),
        ("{channel}", or_empty(&metadata.channel)),
        ("{playlist}", or_empty(&metadata.playlist)),
        ("{chapter}", or_empty(&metadata.chapter)),
        ("{timestamp}", or_empty(&metadata.current_time)),
        ("{date}", now.format("%Y-%m-%d").to_string()),
        ("{time}", now.format("%H-%M").to_string()),
        ("{datetime}", now.format("%Y-%m-%d_%H-%M-%S").to_string()),
        ("{year}", now.format("%Y").to_string()),
        ("{month}", now.format("%m").to_string()),
        ("{day}", now.format("%d").to_string()),
        ("{hour}", now.format("%H").to_string()),
        ("{minute}", now.format("%M").to_string()),
        ("{second}", now.format("%S").to_string()),
    ];

    let mut out = template.to_string();
    for (placeholder, value) in table {
        out = out.replace(placeholder, &value);
    }
    out
}

/// Post-substitution cleanup: path-hostile characters become `-`, runs of
/// `-`/`_`/whitespace collapse to a single `-`, and leading/trailing
/// separators are stripped.
fn clean(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_separator = false;
    for c in s.chars() {
        let c = match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
            c => c,
        };
        if c == '-' || c == '_' || c.is_whitespace() {
            pending_separator = true;
        } else {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        }
    }
    out
}
