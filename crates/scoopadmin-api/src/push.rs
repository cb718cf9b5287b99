//! Real-time push feed with auto-reconnect.
//!
//! Connects to the backend's order-event websocket and streams parsed
//! events through a [`tokio::sync::broadcast`] channel. The first
//! message after every (re)connect is the initial-state snapshot replay
//! and is skipped; only subsequent messages become events.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::{self, ClientRequestBuilder};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::Error;

const EVENT_CHANNEL_CAPACITY: usize = 256;

// ── PushEvent ────────────────────────────────────────────────────────

/// A parsed event from the push feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    /// What happened: `"added"`, `"modified"`, `"removed"`.
    pub action: String,

    /// The resource path segment the event belongs to, e.g. `"orders"`.
    pub resource: String,

    /// Id of the affected record, if the backend sends one.
    #[serde(default)]
    pub id: Option<String>,

    /// All remaining fields the backend sends.
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

// ── ReconnectConfig ──────────────────────────────────────────────────

/// Exponential backoff configuration for feed reconnection.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt. Default: 1s.
    pub initial_delay: Duration,

    /// Upper bound on backoff delay. Default: 30s.
    pub max_delay: Duration,

    /// Maximum reconnection attempts before giving up.
    /// `None` means retry forever.
    pub max_retries: Option<u32>,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            max_retries: None,
        }
    }
}

// ── PushHandle ───────────────────────────────────────────────────────

/// Handle to a running push feed.
pub struct PushHandle {
    event_rx: broadcast::Receiver<Arc<PushEvent>>,
    cancel: CancellationToken,
}

impl PushHandle {
    /// Connect to the feed and spawn the reconnection loop.
    ///
    /// Returns immediately once the background task is spawned; the
    /// first connection attempt happens asynchronously.
    pub fn connect(ws_url: Url, reconnect: ReconnectConfig, cancel: CancellationToken) -> Self {
        let (event_tx, event_rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            feed_loop(ws_url, event_tx, reconnect, task_cancel).await;
        });

        Self { event_rx, cancel }
    }

    /// Get a new broadcast receiver for the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<PushEvent>> {
        self.event_rx.resubscribe()
    }

    /// Signal the background task to shut down gracefully.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Derive the feed URL from the REST base URL (`http` → `ws`).
pub fn feed_url(api_base: &Url) -> Result<Url, Error> {
    let mut url = api_base
        .join("api/orders/feed")
        .map_err(Error::InvalidUrl)?;
    let scheme = match url.scheme() {
        "https" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|()| Error::PushConnect(format!("cannot derive ws scheme for {api_base}")))?;
    Ok(url)
}

// ── Background reconnection loop ─────────────────────────────────────

async fn feed_loop(
    ws_url: Url,
    event_tx: broadcast::Sender<Arc<PushEvent>>,
    reconnect: ReconnectConfig,
    cancel: CancellationToken,
) {
    let mut attempt: u32 = 0;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = connect_and_read(&ws_url, &event_tx, &cancel) => {
                match result {
                    // Clean disconnect: reset the counter, reconnect now.
                    Ok(()) => {
                        tracing::info!("push feed disconnected cleanly, reconnecting");
                        attempt = 0;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, attempt, "push feed error");

                        if let Some(max) = reconnect.max_retries {
                            if attempt >= max {
                                tracing::error!(max_retries = max, "push feed giving up");
                                break;
                            }
                        }

                        let delay = backoff_delay(attempt, &reconnect);
                        tokio::select! {
                            biased;
                            () = cancel.cancelled() => break,
                            () = tokio::time::sleep(delay) => {}
                        }

                        attempt += 1;
                    }
                }
            }
        }
    }

    tracing::debug!("push feed loop exiting");
}

fn backoff_delay(attempt: u32, config: &ReconnectConfig) -> Duration {
    let base =
        config.initial_delay.as_secs_f64() * f64::from(2_u32.saturating_pow(attempt.min(30)));
    let capped = base.min(config.max_delay.as_secs_f64());

    // Deterministic jitter seeded from the attempt number. Not random,
    // but enough spread to keep reconnecting clients from thundering in
    // lockstep.
    let jitter_factor = 1.0 + 0.25 * (f64::from(attempt) * 7.3).sin();

    Duration::from_secs_f64((capped * jitter_factor).max(0.0))
}

// ── Single connection lifecycle ──────────────────────────────────────

/// Establish one connection and read messages until it drops.
///
/// The first text frame is the snapshot replay and is never broadcast.
async fn connect_and_read(
    url: &Url,
    event_tx: &broadcast::Sender<Arc<PushEvent>>,
    cancel: &CancellationToken,
) -> Result<(), Error> {
    tracing::info!(url = %url, "connecting to push feed");

    let uri: tungstenite::http::Uri = url
        .as_str()
        .parse()
        .map_err(|e: tungstenite::http::uri::InvalidUri| Error::PushConnect(e.to_string()))?;
    let request = ClientRequestBuilder::new(uri);

    let (ws_stream, _response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| Error::PushConnect(e.to_string()))?;

    tracing::info!("push feed connected");

    let (_write, mut read) = ws_stream.split();
    let mut seen_snapshot = false;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(()),
            frame = read.next() => {
                match frame {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        if seen_snapshot {
                            parse_and_broadcast(&text, event_tx);
                        } else {
                            // Initial-state replay, not a new event.
                            tracing::debug!("skipping initial snapshot frame");
                            seen_snapshot = true;
                        }
                    }
                    Some(Ok(tungstenite::Message::Ping(_))) => {
                        tracing::trace!("push feed ping");
                    }
                    Some(Ok(tungstenite::Message::Close(frame))) => {
                        if let Some(ref cf) = frame {
                            tracing::info!(code = %cf.code, reason = %cf.reason, "push feed close frame");
                        }
                        return Ok(());
                    }
                    Some(Err(e)) => {
                        return Err(Error::PushConnect(e.to_string()));
                    }
                    None => {
                        tracing::info!("push feed stream ended");
                        return Ok(());
                    }
                    _ => {
                        // Binary, Pong, Frame -- ignore
                    }
                }
            }
        }
    }
}

/// Parse a text frame and broadcast the event it carries.
fn parse_and_broadcast(text: &str, event_tx: &broadcast::Sender<Arc<PushEvent>>) {
    match serde_json::from_str::<PushEvent>(text) {
        Ok(event) => {
            // Send errors just mean no active subscribers right now.
            let _ = event_tx.send(Arc::new(event));
        }
        Err(e) => {
            tracing::debug!(error = %e, "unparsable push frame, dropping");
        }
    }
}
