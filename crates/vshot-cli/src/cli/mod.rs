//! CLI for the VShot screenshot saver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{run_capture, run_ping, run_profile, run_settings, CaptureArgs, SettingsCommand};

/// Top-level CLI for the VShot screenshot saver.
#[derive(Debug, Parser)]
#[command(name = "vshot")]
#[command(about = "VShot: video screenshot capture-to-disk pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Save a captured screenshot through the background service.
    Capture(CaptureArgs),

    /// Show or change the stored settings record.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Show the capability profile detected from a user-agent string.
    Profile {
        /// User-agent string to classify (conservative limits when empty).
        #[arg(long, default_value = "")]
        user_agent: String,
    },

    /// Round-trip a ping through a freshly spawned background service.
    Ping,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        match cli.command {
            CliCommand::Capture(args) => run_capture(args).await,
            CliCommand::Settings { command } => run_settings(command),
            CliCommand::Profile { user_agent } => run_profile(&user_agent),
            CliCommand::Ping => run_ping().await,
        }
    }
}
