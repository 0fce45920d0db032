//! Payload persistence: decode, uniquify, write-then-rename.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data_url::{decode_data_url, DataUrlError};

/// Why a save failed. Platform errors are surfaced verbatim to the caller;
/// the executor does not retry with a different path.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid image payload: {0}")]
    Payload(#[from] DataUrlError),
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Saves a data-URI payload under `root` at the normalized relative path.
///
/// The bytes go to a `.part` sibling first and are renamed into place, so
/// no partial file is ever observable at the final path. On a name
/// conflict the target is uniquified, never overwritten. Returns the
/// absolute path written.
pub async fn save_payload(
    root: &Path,
    relative_path: &str,
    data_url: &str,
) -> Result<PathBuf, SaveError> {
    let bytes = decode_data_url(data_url)?;

    let target = uniquify(root.join(relative_path));
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error("create directory", parent, e))?;
    }

    let mut part = target.clone().into_os_string();
    part.push(".part");
    let part = PathBuf::from(part);

    tokio::fs::write(&part, &bytes)
        .await
        .map_err(|e| io_error("write", &part, e))?;
    tokio::fs::rename(&part, &target)
        .await
        .map_err(|e| io_error("finalize", &target, e))?;
    Ok(target)
}

fn io_error(action: &'static str, path: &Path, source: std::io::Error) -> SaveError {
    SaveError::Io {
        action,
        path: path.display().to_string(),
        source,
    }
}

/// Appends ` (1)`, ` (2)`, … before the extension until the name is free.
fn uniquify(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("screenshot");
    let extension = path.extension().and_then(|s| s.to_str());
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut n: u32 = 1;
    loop {
        let name = match extension {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_url::to_data_url;
    use tempfile::tempdir;

    const PAYLOAD: &[u8] = b"not really a png";

    #[tokio::test]
    async fn writes_the_decoded_payload() {
        let root = tempdir().unwrap();
        let url = to_data_url(PAYLOAD, "image/png");
        let saved = save_payload(root.path(), "clips/a.png", &url).await.unwrap();
        assert_eq!(saved, root.path().join("clips/a.png"));
        assert_eq!(std::fs::read(&saved).unwrap(), PAYLOAD);
    }

    #[tokio::test]
    async fn no_part_file_remains() {
        let root = tempdir().unwrap();
        let url = to_data_url(PAYLOAD, "image/png");
        save_payload(root.path(), "a.png", &url).await.unwrap();
        let names: Vec<String> = std::fs::read_dir(root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png".to_string()]);
    }

    #[tokio::test]
    async fn conflicting_names_are_uniquified() {
        let root = tempdir().unwrap();
        let url = to_data_url(PAYLOAD, "image/png");
        let first = save_payload(root.path(), "a.png", &url).await.unwrap();
        let second = save_payload(root.path(), "a.png", &url).await.unwrap();
        let third = save_payload(root.path(), "a.png", &url).await.unwrap();
        assert_eq!(first, root.path().join("a.png"));
        assert_eq!(second, root.path().join("a (1).png"));
        assert_eq!(third, root.path().join("a (2).png"));
        assert_eq!(std::fs::read(first).unwrap(), PAYLOAD);
    }

    #[tokio::test]
    async fn bad_payload_is_a_payload_error() {
        let root = tempdir().unwrap();
        let err = save_payload(root.path(), "a.png", "data:image/png;base64,???")
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::Payload(_)));
    }
}
