// ── Domain event bus ──
//
// Fans semantic events out to whichever list controllers are mounted.
// The push feed is one producer; the bridge task below translates raw
// feed frames into domain events and a user-facing notification.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use scoopadmin_api::{PushEvent, ResourceKind};

use crate::dispatcher::{Dispatcher, NotificationLevel};

const EVENT_BUS_CAPACITY: usize = 64;

/// A semantic event observed by the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainEvent {
    /// A record of `kind` was created outside this session (a customer
    /// placed an order, another operator added a product). Mounted
    /// screens for the same kind refetch their current query.
    ResourceAdded { kind: ResourceKind },
}

/// Broadcast bus for [`DomainEvent`]s. Cheaply cloneable.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: DomainEvent) {
        // Zero subscribers is fine.
        let _ = self.tx.send(event);
    }
}

/// Bridge the raw push feed onto the domain bus.
///
/// Only `added` frames become domain events; `modified`/`removed` are
/// logged and dropped (the next explicit refetch picks them up).
/// Each `added` frame also raises an info toast through the
/// dispatcher's notification stream.
pub fn spawn_push_bridge(
    mut push_rx: broadcast::Receiver<Arc<PushEvent>>,
    bus: EventBus,
    dispatcher: Dispatcher,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                frame = push_rx.recv() => match frame {
                    Ok(event) => handle_frame(&event, &bus, &dispatcher),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "push bridge lagged, dropping events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        debug!("push bridge exiting");
    })
}

fn handle_frame(event: &PushEvent, bus: &EventBus, dispatcher: &Dispatcher) {
    let Some(kind) = ResourceKind::from_path_segment(&event.resource) else {
        debug!(resource = %event.resource, "push frame for unknown resource");
        return;
    };

    match event.action.as_str() {
        "added" => {
            bus.publish(DomainEvent::ResourceAdded { kind });
            dispatcher.notify(
                NotificationLevel::Info,
                format!("New {} received", kind.label().to_lowercase()),
            );
        }
        other => {
            debug!(action = other, resource = %kind, "ignoring push frame");
        }
    }
}
