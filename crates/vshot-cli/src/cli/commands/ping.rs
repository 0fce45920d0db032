//! `vshot ping` – verify the background service answers.

use anyhow::Result;

use vshot_core::browser;
use vshot_core::executor::DownloadExecutor;
use vshot_core::messaging::{self, Request, Response};
use vshot_core::settings::SettingsStore;

pub async fn run_ping() -> Result<()> {
    let profile = browser::init_profile("");
    let store = SettingsStore::default_location()?;
    let executor = DownloadExecutor::new(std::env::current_dir()?, profile, store);
    let handle = messaging::spawn(executor);

    match handle.request(Request::Ping).await? {
        Response::Ping(pong) => {
            println!("{} at {}", pong.status, pong.timestamp);
            Ok(())
        }
        other => anyhow::bail!("unexpected ping response: {other:?}"),
    }
}
