//! Customer command handlers.

use tabled::Tabled;

use scoopadmin_api::ResourceKind;
use scoopadmin_core::Dispatcher;
use scoopadmin_core::model::Customer;

use crate::cli::{CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Orders")]
    orders: u32,
    #[tabled(rename = "Spent")]
    spent: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            email: c.email.clone(),
            orders: c.orders_count,
            spent: format!("{:.2}", c.total_spent),
        }
    }
}

fn detail(c: &Customer) -> String {
    let lines = vec![
        format!("ID:      {}", c.id),
        format!("Name:    {}", c.name),
        format!("Email:   {}", c.email),
        format!("Phone:   {}", c.phone.as_deref().unwrap_or("-")),
        format!("Orders:  {}", c.orders_count),
        format!("Spent:   {:.2}", c.total_spent),
        format!("Joined:  {}", util::fmt_time(c.created_at.as_ref())),
    ];
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dispatcher: &Dispatcher,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CustomersCommand::List(list) => {
            let ctl =
                util::controller_from_args(ResourceKind::Customers, &list, global.default_limit);
            dispatcher
                .fetch_list(ResourceKind::Customers, &ctl.query())
                .await?;

            let slice = dispatcher.store().customers.list.get();
            let out = output::render_list(
                &global.output(),
                &slice.items,
                |c| CustomerRow::from(c),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if let Some(ref pagination) = slice.pagination {
                output::print_range_footer(&global.output(), pagination, global.quiet);
            }
            Ok(())
        }

        CustomersCommand::Get { id } => {
            dispatcher.fetch_detail(ResourceKind::Customers, &id).await?;
            let slice = dispatcher.store().customers.detail.get();
            let customer = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Customer".into(),
                id,
                list_command: "customers list".into(),
            })?;
            let out = output::render_single(&global.output(), &customer, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete customer {id}? This removes their order history."),
                global.yes,
            )? {
                return Ok(());
            }
            dispatcher.delete(ResourceKind::Customers, &id).await?;
            if !global.quiet {
                eprintln!("Customer deleted");
            }
            Ok(())
        }
    }
}
