//! Message contract between the capture collaborator and the background
//! service.
//!
//! Every message is JSON-serializable with camelCase keys; requests are
//! tagged by an `action` field. One request is consumed exactly once by the
//! service and answered with exactly one response.

mod service;

pub use service::{spawn, ServiceHandle};

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Request to save one captured screenshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    /// Image payload as a base64 `data:` URI.
    pub data_url: String,
    /// Suggested filename (template output). Missing or empty falls back
    /// to a timestamp-based name during normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Auto-organization folder hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    /// Per-request override of the stored silent-downloads setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silent_downloads: Option<bool>,
}

/// Requests the service understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    DownloadScreenshot(DownloadRequest),
    GetSettings,
    Ping,
}

/// Response to [`Request::DownloadScreenshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to [`Request::Ping`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub timestamp: i64,
}

/// Any response the service can produce.
///
/// Untagged on the wire: each response is the bare JSON object its action
/// documents. Variant order matters for deserialization: `Settings`
/// accepts any object (every field has a default), so it must come after
/// the variants with required fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Download(DownloadResponse),
    Ping(PingResponse),
    Settings(Settings),
    Error { success: bool, error: String },
}
