//! Cross-browser path-segment sanitization.

/// Maximum characters kept in a single path segment by default.
pub const DEFAULT_MAX_SEGMENT_LEN: usize = 50;

/// Device names Windows reserves regardless of case.
const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes one path segment for safe use in a download path.
///
/// - Replaces `< > : " | ? *` and ASCII control characters with `_`
/// - Trims leading/trailing whitespace and dots (trailing dots are illegal
///   on some filesystems)
/// - Prefixes `_` when the segment matches a reserved device name
/// - Limits length to [`DEFAULT_MAX_SEGMENT_LEN`] characters
///
/// Pure and total: never fails for any input, including empty strings,
/// unicode, or strings made entirely of illegal characters. Empty in,
/// empty out; the caller handles the empty case.
pub fn sanitize_segment(raw: &str) -> String {
    sanitize_segment_with_limit(raw, DEFAULT_MAX_SEGMENT_LEN)
}

/// [`sanitize_segment`] with an explicit length limit, for callers that
/// reserve part of the segment budget (e.g. a filename extension).
pub fn sanitize_segment_with_limit(raw: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let mapped = match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        };
        out.push(mapped);
    }

    let trimmed = out.trim_matches(|c: char| c.is_whitespace() || c == '.');
    let mut segment = trimmed.to_string();

    let upper = segment.to_uppercase();
    if RESERVED_DEVICE_NAMES.contains(&upper.as_str()) {
        segment.insert(0, '_');
    }

    if segment.chars().count() > max_len {
        segment = segment.chars().take(max_len).collect();
    }

    // The cut can expose a trailing dot or space; re-trim so sanitizing an
    // already-sanitized segment is a no-op.
    segment
        .trim_end_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}
