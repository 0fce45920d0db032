//! `vshot profile` – show the detected browser capability profile.

use anyhow::Result;
use vshot_core::browser::CapabilityProfile;

/// Uses the pure detection path so inspecting a user-agent never pins the
/// process-wide cached profile.
pub fn run_profile(user_agent: &str) -> Result<()> {
    let profile = CapabilityProfile::detect(user_agent);
    println!("browser:            {}", profile.browser.as_str());
    println!("max path length:    {}", profile.max_path_length);
    println!("max segment length: {}", profile.max_segment_length);
    println!("max path depth:     {}", profile.max_path_depth);
    println!(
        "ui suppression:     {}",
        if profile.supports_ui_suppression {
            "supported"
        } else {
            "unsupported"
        }
    );
    Ok(())
}
