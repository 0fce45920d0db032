//! In-process background service: receives requests, drives the executor.

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot};

use super::{PingResponse, Request, Response};
use crate::executor::DownloadExecutor;

/// Capacity of the request queue; senders back-pressure beyond this.
const CHANNEL_CAPACITY: usize = 32;

struct Envelope {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// Client handle to the background service. Cheap to clone; the service
/// stops once every handle is dropped.
#[derive(Clone)]
pub struct ServiceHandle {
    tx: mpsc::Sender<Envelope>,
}

impl ServiceHandle {
    /// Sends a request and waits for its response. Fails when the service
    /// has shut down.
    pub async fn request(&self, request: Request) -> Result<Response> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow!("receiving end does not exist"))?;
        reply_rx
            .await
            .map_err(|_| anyhow!("service dropped the request"))
    }

    /// Handle whose service is gone; every delivery fails immediately.
    #[cfg(test)]
    pub(crate) fn closed() -> Self {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        Self { tx }
    }
}

/// Spawns the service loop onto the current tokio runtime.
pub fn spawn(executor: DownloadExecutor) -> ServiceHandle {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(run(rx, executor));
    ServiceHandle { tx }
}

/// One request is handled to completion before the next is taken.
async fn run(mut rx: mpsc::Receiver<Envelope>, executor: DownloadExecutor) {
    while let Some(envelope) = rx.recv().await {
        let response = dispatch(&executor, envelope.request).await;
        // A caller that gave up waiting is not an error.
        let _ = envelope.reply.send(response);
    }
    tracing::debug!("background service stopped");
}

async fn dispatch(executor: &DownloadExecutor, request: Request) -> Response {
    match request {
        Request::DownloadScreenshot(req) => Response::Download(executor.download(req).await),
        Request::GetSettings => Response::Settings(executor.settings_snapshot()),
        Request::Ping => Response::Ping(PingResponse {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }),
    }
}
