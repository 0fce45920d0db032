//! Path composition and per-browser constraint enforcement.

use super::fallback::fallback_path;
use super::sanitize::sanitize_segment_with_limit;
use crate::browser::{Browser, CapabilityProfile};

/// Outcome of path normalization.
///
/// `path` is always a non-empty relative forward-slash path. When
/// `fallback` is set, the path is a bare timestamp-based filename with no
/// user-controlled segments.
#[derive(Debug, Clone)]
pub struct PathResult {
    pub success: bool,
    pub path: String,
    pub fallback: bool,
    pub reason: Option<String>,
}

/// Edge reserves one depth level for the filename, so a custom base keeps
/// at most this many segments there.
const EDGE_MAX_BASE_SEGMENTS: usize = 3;

/// Composes the custom base path, the folder hint, and the filename into a
/// validated relative path for the given browser profile.
///
/// Length and depth are checked on the final joined string; when either
/// limit is exceeded the whole composition is discarded for the timestamp
/// fallback rather than partially truncated.
pub fn normalize(
    filename: &str,
    folder_hint: &str,
    custom_base: &str,
    profile: &CapabilityProfile,
) -> PathResult {
    let mut segments: Vec<String> = Vec::new();

    if !custom_base.is_empty() {
        let mut base = split_segments(custom_base, profile.max_segment_length);
        // The folder hint is deliberately not capped the same way; only the
        // user's base folder competes with Edge's depth budget.
        if profile.browser == Browser::Edge && base.len() > EDGE_MAX_BASE_SEGMENTS {
            base.truncate(EDGE_MAX_BASE_SEGMENTS);
        }
        segments.extend(base);
    }

    if !folder_hint.is_empty() {
        segments.extend(split_segments(folder_hint, profile.max_segment_length));
    }

    segments.push(normalize_filename(filename, profile.max_segment_length));

    let joined = segments.join("/");
    let length = joined.chars().count();
    if length > profile.max_path_length {
        return fallback_path(
            filename,
            &format!(
                "composed path is {length} characters, over the {} limit",
                profile.max_path_length
            ),
        );
    }
    if segments.len() > profile.max_path_depth {
        return fallback_path(
            filename,
            &format!(
                "composed path is {} levels deep, over the {} limit",
                segments.len(),
                profile.max_path_depth
            ),
        );
    }

    PathResult {
        success: true,
        path: joined,
        fallback: false,
        reason: None,
    }
}

/// Slash-normalizes a user-supplied path, splits it, sanitizes every piece,
/// and drops pieces that sanitize to nothing (they contribute no segment,
/// not an empty one).
fn split_segments(raw: &str, max_segment_length: usize) -> Vec<String> {
    raw.replace('\\', "/")
        .trim_matches('/')
        .split('/')
        .map(|piece| sanitize_segment_with_limit(piece, max_segment_length))
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Normalizes the final filename component, extension-aware: the name part
/// is sanitized with the segment budget minus the extension, then the
/// extension is reattached. Empty input gets a timestamp-based name so the
/// component is always present.
fn normalize_filename(filename: &str, max_segment_length: usize) -> String {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return format!(
            "screenshot-{}.png",
            chrono::Utc::now().timestamp_millis()
        );
    }

    let (stem, extension) = match trimmed.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < trimmed.len() => (&trimmed[..idx], &trimmed[idx..]),
        _ => (trimmed, ""),
    };

    let budget = max_segment_length.saturating_sub(extension.chars().count());
    let stem = sanitize_segment_with_limit(stem, budget);
    if stem.is_empty() {
        return format!(
            "screenshot-{}{}",
            chrono::Utc::now().timestamp_millis(),
            if extension.is_empty() { ".png" } else { extension }
        );
    }
    format!("{stem}{extension}")
}
