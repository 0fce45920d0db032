//! Integration test: spawn the background service and drive the message
//! protocol end to end against a temp download root.

use tempfile::tempdir;
use vshot_core::browser::{Browser, CapabilityProfile};
use vshot_core::data_url::to_data_url;
use vshot_core::executor::DownloadExecutor;
use vshot_core::messaging::{self, DownloadRequest, Request, Response};
use vshot_core::settings::SettingsStore;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn download(filename: &str, folder: Option<&str>, silent: Option<bool>) -> Request {
    Request::DownloadScreenshot(DownloadRequest {
        data_url: to_data_url(PNG_MAGIC, "image/png"),
        filename: Some(filename.to_string()),
        folder_path: folder.map(str::to_string),
        silent_downloads: silent,
    })
}

fn spawn_service(
    root: &std::path::Path,
    state: &std::path::Path,
    browser: Browser,
) -> messaging::ServiceHandle {
    let executor = DownloadExecutor::new(
        root.to_path_buf(),
        CapabilityProfile::for_browser(browser),
        SettingsStore::at_path(state.join("settings.toml")),
    );
    messaging::spawn(executor)
}

#[tokio::test]
async fn capture_flow_saves_and_uniquifies() {
    let root = tempdir().unwrap();
    let state = tempdir().unwrap();
    let handle = spawn_service(root.path(), state.path(), Browser::Chrome);

    // Collaborators ping before sending real work.
    match handle.request(Request::Ping).await.unwrap() {
        Response::Ping(pong) => {
            assert_eq!(pong.status, "ok");
            assert!(pong.timestamp > 0);
        }
        other => panic!("unexpected ping response: {other:?}"),
    }

    let first = match handle
        .request(download("clip.png", Some("channel/2024"), None))
        .await
        .unwrap()
    {
        Response::Download(resp) => resp,
        other => panic!("unexpected response: {other:?}"),
    };
    assert!(first.success);
    assert_eq!(first.download_id, Some(1));
    assert_eq!(
        std::fs::read(root.path().join("channel/2024/clip.png")).unwrap(),
        PNG_MAGIC
    );

    // The same name again is uniquified, never clobbered.
    let second = match handle
        .request(download("clip.png", Some("channel/2024"), None))
        .await
        .unwrap()
    {
        Response::Download(resp) => resp,
        other => panic!("unexpected response: {other:?}"),
    };
    assert!(second.success);
    assert_eq!(second.download_id, Some(2));
    assert!(root.path().join("channel/2024/clip (1).png").exists());
}

#[tokio::test]
async fn get_settings_returns_the_resolved_record() {
    let root = tempdir().unwrap();
    let state = tempdir().unwrap();
    let handle = spawn_service(root.path(), state.path(), Browser::Chrome);

    match handle.request(Request::GetSettings).await.unwrap() {
        Response::Settings(settings) => {
            assert!(!settings.silent_downloads);
            assert!(settings.include_video_title);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn silent_capture_succeeds_without_ui_suppression_support() {
    let root = tempdir().unwrap();
    let state = tempdir().unwrap();
    let handle = spawn_service(root.path(), state.path(), Browser::Firefox);

    match handle
        .request(download("clip.png", None, Some(true)))
        .await
        .unwrap()
    {
        Response::Download(resp) => assert!(resp.success),
        other => panic!("unexpected response: {other:?}"),
    }
    assert!(root.path().join("clip.png").exists());
}

#[tokio::test]
async fn constraint_violations_save_under_the_fallback_name() {
    let root = tempdir().unwrap();
    let state = tempdir().unwrap();
    // Unknown host: depth limit 3, so this four-level hint overflows.
    let handle = spawn_service(root.path(), state.path(), Browser::Unknown);

    match handle
        .request(download("clip.png", Some("a/b/c/d"), None))
        .await
        .unwrap()
    {
        Response::Download(resp) => assert!(resp.success),
        other => panic!("unexpected response: {other:?}"),
    }

    let names: Vec<String> = std::fs::read_dir(root.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(
        names[0].starts_with("screenshot-") && names[0].ends_with(".png"),
        "expected a bare fallback name, got {names:?}"
    );
}
