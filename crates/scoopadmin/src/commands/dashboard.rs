//! Dashboard summary handler.

use scoopadmin_core::Dispatcher;
use scoopadmin_core::model::DashboardSummary;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(s: &DashboardSummary) -> String {
    let lines = vec![
        format!("Orders today:    {}", s.orders_today),
        format!("Revenue today:   {:.2}", s.revenue_today),
        format!("Pending orders:  {}", s.pending_orders),
        format!("Total customers: {}", s.total_customers),
        format!("Total products:  {}", s.total_products),
    ];
    lines.join("\n")
}

pub async fn handle(dispatcher: &Dispatcher, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = dispatcher.dashboard_summary().await?;
    let out = output::render_single(&global.output(), &summary, detail, |s| {
        s.orders_today.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
