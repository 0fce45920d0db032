//! User settings: the persisted record, defaults, and the title builder.

mod resolve;
mod store;

pub use resolve::{resolve_settings, SettingsStrategy};
pub use store::SettingsStore;

use serde::{Deserialize, Serialize};

use crate::path_model::DEFAULT_TEMPLATE;

/// Auto-organization rule for captured screenshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizeFolders {
    #[default]
    None,
    Channel,
    Date,
    ChannelDate,
    Custom,
}

/// Persisted user settings.
///
/// Every field has a default, so a partial stored record merges over
/// defaults instead of clearing fields. Keys are camelCase on disk and on
/// the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Prepend `custom_download_path` to every save path.
    pub use_custom_path: bool,
    pub custom_download_path: String,
    pub organize_folders: OrganizeFolders,
    /// Pattern for [`OrganizeFolders::Custom`], e.g. `{channel}/{date}`.
    pub custom_folder_pattern: String,
    /// Raw filename template; blank means the title-builder default.
    pub filename_template: String,
    /// Suppress native download UI while saving.
    pub silent_downloads: bool,
    pub include_video_title: bool,
    pub include_channel_name: bool,
    pub include_timestamp: bool,
    pub include_date: bool,
    pub title_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_custom_path: false,
            custom_download_path: String::new(),
            organize_folders: OrganizeFolders::None,
            custom_folder_pattern: "{channel}/{date}".to_string(),
            filename_template: String::new(),
            silent_downloads: false,
            include_video_title: true,
            include_channel_name: false,
            include_timestamp: true,
            include_date: false,
            title_separator: "-".to_string(),
        }
    }
}

impl Settings {
    /// Template used for a capture: the configured one when present, else
    /// one built from the title flags, else the engine default.
    pub fn effective_template(&self) -> String {
        if !self.filename_template.trim().is_empty() {
            return self.filename_template.clone();
        }
        self.title_builder_template()
    }

    fn title_builder_template(&self) -> String {
        let mut parts = Vec::new();
        if self.include_video_title {
            parts.push("{title}");
        }
        if self.include_channel_name {
            parts.push("{channel}");
        }
        if self.include_timestamp {
            parts.push("{timestamp}");
        }
        if self.include_date {
            parts.push("{date}");
        }
        if parts.is_empty() {
            DEFAULT_TEMPLATE.to_string()
        } else {
            parts.join(&self.title_separator)
        }
    }
}
