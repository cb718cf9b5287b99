//! Order command handlers.

use serde_json::json;
use tabled::Tabled;

use scoopadmin_api::{MutationBody, ResourceKind};
use scoopadmin_core::Dispatcher;
use scoopadmin_core::model::{Order, OrderStatus};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id.clone(),
            number: o.order_number.clone(),
            status: o.status.to_string(),
            customer: o.customer_name.clone().unwrap_or_default(),
            total: format!("{:.2}", o.total),
            placed: util::fmt_time(o.created_at.as_ref()),
        }
    }
}

fn detail(o: &Order) -> String {
    let lines = vec![
        format!("ID:       {}", o.id),
        format!("Number:   {}", o.order_number),
        format!("Status:   {}", o.status),
        format!("Customer: {}", o.customer_name.as_deref().unwrap_or("-")),
        format!("Email:    {}", o.customer_email.as_deref().unwrap_or("-")),
        format!("Items:    {}", o.items_count),
        format!("Total:    {:.2}", o.total),
        format!("Placed:   {}", util::fmt_time(o.created_at.as_ref())),
    ];
    lines.join("\n")
}

/// Parse and normalize a user-supplied status value.
fn parse_status(raw: &str) -> Result<OrderStatus, CliError> {
    let status: OrderStatus =
        serde_json::from_value(json!(raw.to_lowercase())).map_err(|_| CliError::Validation {
            reason: format!("unknown status '{raw}'"),
        })?;
    if matches!(status, OrderStatus::Unknown) {
        return Err(CliError::Validation {
            reason: format!("unknown status '{raw}'"),
        });
    }
    Ok(status)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dispatcher: &Dispatcher,
    args: OrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List(list_args) => {
            let mut ctl = util::controller_from_args(
                ResourceKind::Orders,
                &list_args.list,
                global.default_limit,
            );
            if let Some(ref status) = list_args.status {
                parse_status(status)?;
                ctl.set_filter("status", status.to_lowercase());
                ctl.set_page(list_args.list.page, None);
            }
            dispatcher
                .fetch_list(ResourceKind::Orders, &ctl.query())
                .await?;

            let slice = dispatcher.store().orders.list.get();
            let out = output::render_list(
                &global.output(),
                &slice.items,
                |o| OrderRow::from(o),
                |o| o.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if let Some(ref pagination) = slice.pagination {
                output::print_range_footer(&global.output(), pagination, global.quiet);
            }
            Ok(())
        }

        OrdersCommand::Get { id } => {
            dispatcher.fetch_detail(ResourceKind::Orders, &id).await?;
            let slice = dispatcher.store().orders.detail.get();
            let order = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Order".into(),
                id,
                list_command: "orders list".into(),
            })?;
            let out = output::render_single(&global.output(), &order, detail, |o| o.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::SetStatus { id, status } => {
            let status = parse_status(&status)?;
            dispatcher
                .update(
                    ResourceKind::Orders,
                    MutationBody::Json(json!({ "id": id, "status": status })),
                )
                .await?;
            if !global.quiet {
                eprintln!("Order {id} is now {status}");
            }
            Ok(())
        }

        OrdersCommand::Delete { id } => {
            if !util::confirm(&format!("Delete order {id}? This cannot be undone."), global.yes)? {
                return Ok(());
            }
            dispatcher.delete(ResourceKind::Orders, &id).await?;
            if !global.quiet {
                eprintln!("Order deleted");
            }
            Ok(())
        }
    }
}
