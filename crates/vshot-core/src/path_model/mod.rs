//! Download path modeling: templating, sanitization, normalization, fallback.
//!
//! Turns user settings and per-capture video metadata into a validated
//! relative save path that respects the detected browser's limits.

mod fallback;
mod normalize;
mod sanitize;
mod template;

pub use fallback::fallback_path;
pub use normalize::{normalize, PathResult};
pub use sanitize::{sanitize_segment, sanitize_segment_with_limit, DEFAULT_MAX_SEGMENT_LEN};
pub use template::{expand, expand_folder_pattern, MetadataRecord, DEFAULT_TEMPLATE};

use crate::settings::{OrganizeFolders, Settings};

/// Expands the user's effective filename template for one capture.
pub fn capture_filename(settings: &Settings, metadata: &MetadataRecord) -> String {
    template::expand(&settings.effective_template(), metadata)
}

/// Folder path derived from the auto-organization rule. Empty when the rule
/// is disabled or the metadata it needs is missing.
pub fn organized_folder(settings: &Settings, metadata: &MetadataRecord) -> String {
    let pattern = match settings.organize_folders {
        OrganizeFolders::None => return String::new(),
        OrganizeFolders::Channel => "{channel}",
        OrganizeFolders::Date => "{date}",
        OrganizeFolders::ChannelDate => "{channel}/{date}",
        OrganizeFolders::Custom => settings.custom_folder_pattern.as_str(),
    };
    template::expand_folder_pattern(pattern, metadata)
}

/// Host of the video page URL for the `{site}` placeholder, `www.`-stripped.
///
/// Returns `None` when the URL cannot be parsed or has no host.
pub fn site_from_page_url(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> MetadataRecord {
        MetadataRecord {
            site: Some("youtube.com".to_string()),
            title: Some("Cool Video".to_string()),
            channel: Some("Some Channel".to_string()),
            playlist: None,
            chapter: None,
            current_time: Some("1m30s".to_string()),
        }
    }

    #[test]
    fn capture_filename_uses_the_configured_template() {
        let settings = Settings {
            filename_template: "{site}_{timestamp}".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            capture_filename(&settings, &metadata()),
            "youtube.com-1m30s.png"
        );
    }

    #[test]
    fn capture_filename_defaults_to_the_title_builder() {
        let settings = Settings::default();
        assert_eq!(
            capture_filename(&settings, &metadata()),
            "Cool-Video-1m30s.png"
        );
    }

    #[test]
    fn organized_folder_rules() {
        let meta = metadata();
        let mut settings = Settings::default();
        assert_eq!(organized_folder(&settings, &meta), "");

        settings.organize_folders = OrganizeFolders::Channel;
        assert_eq!(organized_folder(&settings, &meta), "Some-Channel");

        settings.organize_folders = OrganizeFolders::Custom;
        settings.custom_folder_pattern = "{site}/{channel}".to_string();
        assert_eq!(organized_folder(&settings, &meta), "youtube.com/Some-Channel");
    }

    #[test]
    fn organized_folder_missing_channel_is_empty() {
        let settings = Settings {
            organize_folders: OrganizeFolders::Channel,
            ..Settings::default()
        };
        assert_eq!(organized_folder(&settings, &MetadataRecord::default()), "");
    }

    #[test]
    fn site_from_common_page_urls() {
        assert_eq!(
            site_from_page_url("https://www.youtube.com/watch?v=abc").as_deref(),
            Some("youtube.com")
        );
        assert_eq!(
            site_from_page_url("https://vimeo.com/12345").as_deref(),
            Some("vimeo.com")
        );
        assert_eq!(site_from_page_url("not a url"), None);
    }
}
