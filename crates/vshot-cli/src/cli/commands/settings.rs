//! `vshot settings` – inspect or update the stored settings record.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use vshot_core::settings::{OrganizeFolders, SettingsStore};

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the resolved settings record as JSON.
    Show,

    /// Update selected fields of the stored record.
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Prepend the custom base folder to every save path.
    #[arg(long)]
    pub use_custom_path: Option<bool>,

    /// Custom base folder, e.g. "screenshots/youtube".
    #[arg(long)]
    pub custom_path: Option<String>,

    /// Auto-organization rule for captured screenshots.
    #[arg(long, value_enum)]
    pub organize: Option<OrganizeArg>,

    /// Pattern for the custom organization rule, e.g. "{channel}/{date}".
    #[arg(long)]
    pub folder_pattern: Option<String>,

    /// Filename template, e.g. "{site}-{title}-{timestamp}".
    #[arg(long)]
    pub template: Option<String>,

    /// Suppress native download UI while saving.
    #[arg(long)]
    pub silent: Option<bool>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrganizeArg {
    None,
    Channel,
    Date,
    ChannelDate,
    Custom,
}

impl From<OrganizeArg> for OrganizeFolders {
    fn from(value: OrganizeArg) -> Self {
        match value {
            OrganizeArg::None => OrganizeFolders::None,
            OrganizeArg::Channel => OrganizeFolders::Channel,
            OrganizeArg::Date => OrganizeFolders::Date,
            OrganizeArg::ChannelDate => OrganizeFolders::ChannelDate,
            OrganizeArg::Custom => OrganizeFolders::Custom,
        }
    }
}

pub fn run_settings(command: SettingsCommand) -> Result<()> {
    let store = SettingsStore::default_location()?;
    match command {
        SettingsCommand::Show => {
            let settings = store.load_or_init()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsCommand::Set(args) => {
            let mut settings = store.load_or_init()?;
            if let Some(v) = args.use_custom_path {
                settings.use_custom_path = v;
            }
            if let Some(v) = args.custom_path {
                settings.custom_download_path = v;
            }
            if let Some(v) = args.organize {
                settings.organize_folders = v.into();
            }
            if let Some(v) = args.folder_pattern {
                settings.custom_folder_pattern = v;
            }
            if let Some(v) = args.template {
                settings.filename_template = v;
            }
            if let Some(v) = args.silent {
                settings.silent_downloads = v;
            }
            store.save(&settings)?;
            println!("Settings updated at {}", store.path().display());
        }
    }
    Ok(())
}
