// ── Domain model ──
//
// Backend-owned records as the admin sees them. Wire names are the
// backend's camelCase; everything the client holds is a cached copy.

mod banner;
mod customer;
mod email_template;
mod order;
mod product;
mod settings;

pub use banner::Banner;
pub use customer::Customer;
pub use email_template::EmailTemplate;
pub use order::{Order, OrderStatus};
pub use product::Product;
pub use settings::{CompanySettings, DashboardSummary};
