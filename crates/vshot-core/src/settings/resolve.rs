//! Ordered settings-access strategies: messaging, direct storage, defaults.
//!
//! The capture side prefers asking the background service (the service owns
//! the authoritative snapshot), falls back to reading the store directly,
//! and finally to built-in defaults. Settings access never fails an
//! operation.

use anyhow::Result;

use super::{Settings, SettingsStore};
use crate::messaging::{Request, Response, ServiceHandle};
use crate::retry::{RetryDecision, RetryPolicy};

/// One way of obtaining the settings record. Strategies are tried in
/// order; the first success wins.
pub enum SettingsStrategy {
    /// Ask the background service over the message channel, retrying
    /// transient delivery failures with a fixed delay.
    Messaging {
        handle: ServiceHandle,
        policy: RetryPolicy,
    },
    /// Read the persisted record directly.
    Storage(SettingsStore),
    /// Built-in defaults; always succeeds.
    Defaults,
}

impl SettingsStrategy {
    async fn try_load(&self) -> Result<Settings> {
        match self {
            SettingsStrategy::Messaging { handle, policy } => {
                let mut attempt = 1u32;
                loop {
                    match fetch_over_channel(handle).await {
                        Ok(settings) => return Ok(settings),
                        Err(err) => match policy.decide(attempt) {
                            RetryDecision::NoRetry => return Err(err),
                            RetryDecision::RetryAfter(delay) => {
                                tracing::debug!(attempt, "settings fetch failed, retrying: {err:#}");
                                tokio::time::sleep(delay).await;
                                attempt += 1;
                            }
                        },
                    }
                }
            }
            SettingsStrategy::Storage(store) => store.load_or_init(),
            SettingsStrategy::Defaults => Ok(Settings::default()),
        }
    }
}

async fn fetch_over_channel(handle: &ServiceHandle) -> Result<Settings> {
    match handle.request(Request::GetSettings).await? {
        Response::Settings(settings) => Ok(settings),
        Response::Error { error, .. } => anyhow::bail!("settings request failed: {error}"),
        other => anyhow::bail!("unexpected response to getSettings: {other:?}"),
    }
}

/// Resolves settings through `strategies` in order. Exhausting the whole
/// list still yields defaults.
pub async fn resolve_settings(strategies: &[SettingsStrategy]) -> Settings {
    for strategy in strategies {
        match strategy.try_load().await {
            Ok(settings) => return settings,
            Err(err) => tracing::debug!("settings strategy failed: {err:#}"),
        }
    }
    Settings::default()
}
