//! Background download executor: one capture request to one persisted file.

mod restore;
mod save;
mod shelf;

pub use restore::RestoreOnce;
pub use save::SaveError;
pub use shelf::ShelfController;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::browser::CapabilityProfile;
use crate::messaging::{DownloadRequest, DownloadResponse};
use crate::path_model;
use crate::settings::{Settings, SettingsStore};

/// Delay between a request reaching a terminal state and UI restoration.
const RESTORE_DELAY: Duration = Duration::from_millis(1500);

/// Phases of one download request, in order. `Succeeded` and `Failed` are
/// terminal; restoration is scheduled after either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Received,
    PathResolved,
    UiSuppressed,
    Saving,
    Succeeded,
    Failed,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Received => "received",
            Phase::PathResolved => "path_resolved",
            Phase::UiSuppressed => "ui_suppressed",
            Phase::Saving => "saving",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

fn enter(phase: Phase) {
    tracing::debug!(phase = phase.as_str(), "download request phase");
}

/// Privileged-side executor: resolves settings and the final path, performs
/// the save, and manages UI suppression around it.
pub struct DownloadExecutor {
    download_root: PathBuf,
    profile: CapabilityProfile,
    store: SettingsStore,
    shelf: ShelfController,
    next_id: AtomicU32,
}

impl DownloadExecutor {
    pub fn new(download_root: PathBuf, profile: CapabilityProfile, store: SettingsStore) -> Self {
        Self {
            download_root,
            profile,
            store,
            shelf: ShelfController::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// The shared download-UI controller (one flag per process).
    pub fn shelf(&self) -> &ShelfController {
        &self.shelf
    }

    /// Resolved settings record served to `getSettings` callers.
    pub fn settings_snapshot(&self) -> Settings {
        self.store.snapshot()
    }

    /// Handles one capture request to completion. UI restoration is always
    /// scheduled before returning, on success and failure alike.
    pub async fn download(&self, request: DownloadRequest) -> DownloadResponse {
        enter(Phase::Received);
        // Snapshot once; a mid-flight settings write does not affect this
        // request.
        let settings = self.store.snapshot();

        let silent = request
            .silent_downloads
            .unwrap_or(settings.silent_downloads);
        let custom_base = if settings.use_custom_path {
            settings.custom_download_path.as_str()
        } else {
            ""
        };
        let filename = request.filename.as_deref().unwrap_or("");
        let folder = request.folder_path.as_deref().unwrap_or("");

        let resolved = path_model::normalize(filename, folder, custom_base, &self.profile);
        enter(Phase::PathResolved);
        if let Some(reason) = &resolved.reason {
            tracing::warn!(path = %resolved.path, "using fallback path: {reason}");
        } else {
            tracing::debug!(path = %resolved.path, "path resolved");
        }

        let restore = RestoreOnce::new();
        if silent {
            if self.profile.supports_ui_suppression {
                self.shelf.suppress(&restore);
                enter(Phase::UiSuppressed);
            } else {
                // Degraded, not an error: the capture still proceeds.
                tracing::debug!(
                    browser = self.profile.browser.as_str(),
                    "silent mode requested but host cannot hide download UI"
                );
            }
        }

        enter(Phase::Saving);
        let outcome = save::save_payload(&self.download_root, &resolved.path, &request.data_url).await;

        let response = match outcome {
            Ok(saved) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                enter(Phase::Succeeded);
                tracing::info!(download_id = id, path = %saved.display(), "screenshot saved");
                DownloadResponse {
                    success: true,
                    download_id: Some(id),
                    error: None,
                }
            }
            Err(err) => {
                enter(Phase::Failed);
                tracing::error!("save failed: {err}");
                DownloadResponse {
                    success: false,
                    download_id: None,
                    error: Some(err.to_string()),
                }
            }
        };

        schedule_restore(restore);
        response
    }
}

/// Fires the restore token after the fixed delay. The timer is detached
/// and not cancellable; process teardown before it fires leaves the UI
/// hidden until next launch (accepted limitation).
fn schedule_restore(restore: Arc<RestoreOnce>) {
    tokio::spawn(async move {
        tokio::time::sleep(RESTORE_DELAY).await;
        restore.fire();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::Browser;
    use crate::data_url::to_data_url;
    use tempfile::tempdir;

    const PAYLOAD: &[u8] = b"pixels";

    fn request(filename: &str, folder: Option<&str>, silent: Option<bool>) -> DownloadRequest {
        DownloadRequest {
            data_url: to_data_url(PAYLOAD, "image/png"),
            filename: Some(filename.to_string()),
            folder_path: folder.map(str::to_string),
            silent_downloads: silent,
        }
    }

    fn executor(root: &std::path::Path, state: &std::path::Path, browser: Browser) -> DownloadExecutor {
        DownloadExecutor::new(
            root.to_path_buf(),
            CapabilityProfile::for_browser(browser),
            SettingsStore::at_path(state.join("settings.toml")),
        )
    }

    #[tokio::test]
    async fn saves_under_the_folder_hint() {
        let root = tempdir().unwrap();
        let state = tempdir().unwrap();
        let exec = executor(root.path(), state.path(), Browser::Chrome);

        let response = exec.download(request("a.png", Some("channel/2024"), None)).await;
        assert!(response.success);
        assert_eq!(response.download_id, Some(1));
        assert_eq!(
            std::fs::read(root.path().join("channel/2024/a.png")).unwrap(),
            PAYLOAD
        );
    }

    #[tokio::test]
    async fn custom_base_path_is_prepended_when_enabled() {
        let root = tempdir().unwrap();
        let state = tempdir().unwrap();
        let store = SettingsStore::at_path(state.path().join("settings.toml"));
        let mut settings = Settings::default();
        settings.use_custom_path = true;
        settings.custom_download_path = "vshot/captures".to_string();
        store.save(&settings).unwrap();

        let exec = DownloadExecutor::new(
            root.path().to_path_buf(),
            CapabilityProfile::for_browser(Browser::Chrome),
            store,
        );
        let response = exec.download(request("a.png", None, None)).await;
        assert!(response.success);
        assert!(root.path().join("vshot/captures/a.png").exists());
    }

    #[tokio::test]
    async fn silent_mode_suppresses_on_supporting_hosts() {
        let root = tempdir().unwrap();
        let state = tempdir().unwrap();
        let exec = executor(root.path(), state.path(), Browser::Chrome);

        let response = exec.download(request("a.png", None, Some(true))).await;
        assert!(response.success);
        // Restoration is on a 1.5s timer; immediately after the request the
        // shelf is still hidden.
        assert!(!exec.shelf().is_visible());
    }

    #[tokio::test]
    async fn silent_mode_degrades_without_suppression_support() {
        let root = tempdir().unwrap();
        let state = tempdir().unwrap();
        let exec = executor(root.path(), state.path(), Browser::Firefox);

        let response = exec.download(request("a.png", None, Some(true))).await;
        assert!(response.success, "capture must not fail for a missing UI API");
        assert!(exec.shelf().is_visible());
    }

    #[tokio::test]
    async fn malformed_payload_reports_failure() {
        let root = tempdir().unwrap();
        let state = tempdir().unwrap();
        let exec = executor(root.path(), state.path(), Browser::Chrome);

        let response = exec
            .download(DownloadRequest {
                data_url: "nonsense".to_string(),
                filename: Some("a.png".to_string()),
                folder_path: None,
                silent_downloads: None,
            })
            .await;
        assert!(!response.success);
        assert!(response.download_id.is_none());
        assert!(response.error.unwrap().contains("payload"));
    }

    #[tokio::test]
    async fn download_ids_are_monotonic() {
        let root = tempdir().unwrap();
        let state = tempdir().unwrap();
        let exec = executor(root.path(), state.path(), Browser::Chrome);

        let first = exec.download(request("a.png", None, None)).await;
        let second = exec.download(request("b.png", None, None)).await;
        assert_eq!(first.download_id, Some(1));
        assert_eq!(second.download_id, Some(2));
    }
}
