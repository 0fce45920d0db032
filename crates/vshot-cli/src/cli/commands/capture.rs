//! `vshot capture` – save one screenshot through the full pipeline.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use vshot_core::browser;
use vshot_core::data_url::to_data_url;
use vshot_core::executor::DownloadExecutor;
use vshot_core::messaging::{self, DownloadRequest, Request, Response};
use vshot_core::path_model::{self, MetadataRecord};
use vshot_core::retry::RetryPolicy;
use vshot_core::settings::{resolve_settings, SettingsStore, SettingsStrategy};

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Path to the captured image (read and wrapped as a data URI).
    pub image: PathBuf,

    /// Video site host, e.g. "youtube.com". Derived from --page-url when omitted.
    #[arg(long)]
    pub site: Option<String>,

    /// Video page URL; its host fills the {site} placeholder.
    #[arg(long)]
    pub page_url: Option<String>,

    /// Video title.
    #[arg(long)]
    pub title: Option<String>,

    /// Channel name.
    #[arg(long)]
    pub channel: Option<String>,

    /// Playlist name.
    #[arg(long)]
    pub playlist: Option<String>,

    /// Chapter name.
    #[arg(long)]
    pub chapter: Option<String>,

    /// Playback position at capture time, e.g. "1m30s".
    #[arg(long)]
    pub video_time: Option<String>,

    /// Exact filename to use instead of the template output.
    #[arg(long)]
    pub filename: Option<String>,

    /// Folder hint overriding the auto-organization rule.
    #[arg(long)]
    pub folder: Option<String>,

    /// Force silent mode for this capture (overrides the stored setting).
    #[arg(long, conflicts_with = "no_silent")]
    pub silent: bool,

    /// Force visible mode for this capture.
    #[arg(long)]
    pub no_silent: bool,

    /// Host user-agent string for capability detection (conservative limits
    /// when omitted).
    #[arg(long, default_value = "")]
    pub user_agent: String,

    /// Directory screenshots are saved under (defaults to the working
    /// directory).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

pub async fn run_capture(args: CaptureArgs) -> Result<()> {
    let profile = browser::init_profile(&args.user_agent);
    let root = match args.out_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let store = SettingsStore::default_location()?;

    let executor = DownloadExecutor::new(root, profile, store.clone());
    let handle = messaging::spawn(executor);

    // Make sure the background side is up before sending real work.
    match handle.request(Request::Ping).await? {
        Response::Ping(_) => {}
        other => anyhow::bail!("unexpected ping response: {other:?}"),
    }

    let strategies = [
        SettingsStrategy::Messaging {
            handle: handle.clone(),
            policy: RetryPolicy::default(),
        },
        SettingsStrategy::Storage(store),
        SettingsStrategy::Defaults,
    ];
    let settings = resolve_settings(&strategies).await;
    tracing::debug!("resolved settings: {settings:?}");

    let metadata = MetadataRecord {
        site: args.site.or_else(|| {
            args.page_url
                .as_deref()
                .and_then(path_model::site_from_page_url)
        }),
        title: args.title,
        channel: args.channel,
        playlist: args.playlist,
        chapter: args.chapter,
        current_time: args.video_time,
    };

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image {}", args.image.display()))?;
    let filename = args
        .filename
        .unwrap_or_else(|| path_model::capture_filename(&settings, &metadata));
    let folder = args
        .folder
        .unwrap_or_else(|| path_model::organized_folder(&settings, &metadata));
    let silent = if args.silent {
        Some(true)
    } else if args.no_silent {
        Some(false)
    } else {
        None
    };

    let request = DownloadRequest {
        data_url: to_data_url(&bytes, "image/png"),
        filename: Some(filename),
        folder_path: (!folder.is_empty()).then_some(folder),
        silent_downloads: silent,
    };

    match handle.request(Request::DownloadScreenshot(request)).await? {
        Response::Download(resp) if resp.success => {
            println!(
                "Saved screenshot (download id {})",
                resp.download_id.unwrap_or(0)
            );
            Ok(())
        }
        Response::Download(resp) => anyhow::bail!(
            "save failed: {}",
            resp.error.unwrap_or_else(|| "unknown error".to_string())
        ),
        other => anyhow::bail!("unexpected response: {other:?}"),
    }
}
