//! Live watch mode: stream push-feed events until interrupted.

use owo_colors::OwoColorize;
use tokio_util::sync::CancellationToken;

use scoopadmin_api::{PushHandle, ReconnectConfig, ResourceKind, feed_url};
use scoopadmin_core::{
    Dispatcher, DomainEvent, EventBus, ListController, Notification, NotificationLevel,
    spawn_push_bridge,
};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dispatcher: &Dispatcher,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ws_url = feed_url(dispatcher.client().base_url()).map_err(|e| CliError::Push {
        message: e.to_string(),
    })?;

    let cancel = CancellationToken::new();
    let reconnect = ReconnectConfig {
        max_retries: args.max_retries,
        ..ReconnectConfig::default()
    };
    let push = PushHandle::connect(ws_url, reconnect, cancel.clone());

    let bus = EventBus::new();
    let bridge = spawn_push_bridge(
        push.subscribe(),
        bus.clone(),
        dispatcher.clone(),
        cancel.clone(),
    );

    let mut toasts = dispatcher.notifications();
    let mut events = bus.subscribe();
    let orders = ListController::new(ResourceKind::Orders);
    let use_color = output::should_color(&global.color());

    if !global.quiet {
        eprintln!("Watching for order events (ctrl-c to stop)");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            toast = toasts.recv() => {
                if let Ok(toast) = toast {
                    print_toast(&toast, use_color, global.quiet);
                }
            }
            event = events.recv() => {
                if let Ok(event) = event {
                    refetch_for(dispatcher, &orders, &event, global).await;
                }
            }
        }
    }

    cancel.cancel();
    push.shutdown();
    let _ = bridge.await;
    Ok(())
}

/// Refetch the mounted orders list when an event concerns it.
async fn refetch_for(
    dispatcher: &Dispatcher,
    orders: &ListController,
    event: &DomainEvent,
    global: &GlobalOpts,
) {
    let Some(query) = orders.handle_event(event) else {
        return;
    };
    match dispatcher.fetch_list(ResourceKind::Orders, &query).await {
        Ok(()) => {
            if !global.quiet {
                let slice = dispatcher.store().orders.list.get();
                if let Some(order) = slice.items.first() {
                    eprintln!("  latest: {} ({})", order.order_number, order.status);
                }
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "refetch after push event failed");
        }
    }
}

fn print_toast(toast: &Notification, use_color: bool, quiet: bool) {
    if quiet {
        return;
    }
    if use_color {
        match toast.level {
            NotificationLevel::Info => eprintln!("{}", toast.message.cyan()),
            NotificationLevel::Success => eprintln!("{}", toast.message.green()),
            NotificationLevel::Warning => eprintln!("{}", toast.message.yellow()),
            NotificationLevel::Error => eprintln!("{}", toast.message.red()),
        }
    } else {
        eprintln!("{}", toast.message);
    }
}
