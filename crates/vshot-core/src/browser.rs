//! Browser capability detection from the host user-agent string.

use std::sync::OnceLock;

/// Host browser family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Edge,
    Firefox,
    Unknown,
}

impl Browser {
    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Edge => "edge",
            Browser::Firefox => "firefox",
            Browser::Unknown => "unknown",
        }
    }
}

/// Per-browser path limits and API capabilities. Immutable for the process
/// lifetime once detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityProfile {
    pub browser: Browser,
    /// Maximum length of the final joined relative path, in characters.
    pub max_path_length: usize,
    /// Maximum length of a single path segment, in characters.
    pub max_segment_length: usize,
    /// Maximum number of path components, filename included.
    pub max_path_depth: usize,
    /// Whether the host exposes a download-shelf visibility API.
    pub supports_ui_suppression: bool,
}

impl CapabilityProfile {
    /// Pure detection from a user-agent string.
    ///
    /// The Edge marker is checked before the generic Chromium one: Edge
    /// user agents carry both.
    pub fn detect(user_agent: &str) -> Self {
        let browser = if user_agent.contains("Edg") {
            Browser::Edge
        } else if user_agent.contains("Chrome") || user_agent.contains("Chromium") {
            Browser::Chrome
        } else if user_agent.contains("Firefox") {
            Browser::Firefox
        } else {
            Browser::Unknown
        };
        Self::for_browser(browser)
    }

    /// Limit table. Unknown hosts get the most conservative limits.
    pub const fn for_browser(browser: Browser) -> Self {
        match browser {
            Browser::Edge => Self {
                browser,
                max_path_length: 200,
                max_segment_length: 50,
                max_path_depth: 4,
                supports_ui_suppression: true,
            },
            Browser::Chrome => Self {
                browser,
                max_path_length: 260,
                max_segment_length: 50,
                max_path_depth: 8,
                supports_ui_suppression: true,
            },
            Browser::Firefox => Self {
                browser,
                max_path_length: 255,
                max_segment_length: 50,
                max_path_depth: 8,
                supports_ui_suppression: false,
            },
            Browser::Unknown => Self {
                browser,
                max_path_length: 200,
                max_segment_length: 50,
                max_path_depth: 3,
                supports_ui_suppression: false,
            },
        }
    }
}

static PROFILE: OnceLock<CapabilityProfile> = OnceLock::new();

/// Detects once and caches for the process lifetime. Later calls return the
/// cached profile and never re-read the user-agent argument.
pub fn init_profile(user_agent: &str) -> CapabilityProfile {
    *PROFILE.get_or_init(|| CapabilityProfile::detect(user_agent))
}
