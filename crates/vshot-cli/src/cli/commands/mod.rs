//! `vshot` subcommand implementations.

mod capture;
mod ping;
mod profile;
mod settings;

pub use capture::{run_capture, CaptureArgs};
pub use ping::run_ping;
pub use profile::run_profile;
pub use settings::{run_settings, SettingsCommand};
