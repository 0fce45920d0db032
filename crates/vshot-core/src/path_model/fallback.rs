//! Last-resort path generation when normalization cannot produce a safe path.

use super::normalize::PathResult;

const FALLBACK_EXTENSION: &str = ".png";

/// Builds the timestamp-based fallback: a bare `screenshot-<millis><ext>`
/// filename with no directory component, valid and short regardless of why
/// normalization failed. The extension is taken from `original_filename`
/// when it has one; the user-controlled segments are exactly what violated
/// the constraints, so nothing else of the original survives.
pub fn fallback_path(original_filename: &str, reason: &str) -> PathResult {
    let extension = extract_extension(original_filename).unwrap_or(FALLBACK_EXTENSION);
    PathResult {
        success: true,
        path: format!(
            "screenshot-{}{}",
            chrono::Utc::now().timestamp_millis(),
            extension
        ),
        fallback: true,
        reason: Some(reason.to_string()),
    }
}

/// Extension of `name` including the dot, when the dot is neither leading
/// nor trailing.
fn extract_extension(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        return None;
    }
    Some(&name[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_timestamp_name_with_original_extension() {
        let result = fallback_path("very/long/clip.jpeg", "too long");
        assert!(result.success);
        assert!(result.fallback);
        assert!(result.path.starts_with("screenshot-"));
        assert!(result.path.ends_with(".jpeg"));
        assert!(!result.path.contains('/'));
        assert_eq!(result.reason.as_deref(), Some("too long"));
    }

    #[test]
    fn defaults_to_png_without_a_usable_extension() {
        for name in ["clip", "clip.", ".hidden", ""] {
            let result = fallback_path(name, "reason");
            assert!(result.path.ends_with(".png"), "for {name:?}: {}", result.path);
        }
    }

    #[test]
    fn extension_extraction() {
        assert_eq!(extract_extension("a.png"), Some(".png"));
        assert_eq!(extract_extension("a.tar.gz"), Some(".gz"));
        assert_eq!(extract_extension("archive."), None);
        assert_eq!(extract_extension(".bashrc"), None);
        assert_eq!(extract_extension("plain"), None);
    }
}
