//! Clap derive structures for the `scoopadmin` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scoopadmin -- terminal admin panel for the Scoop Nation backend
#[derive(Debug, Parser)]
#[command(
    name = "scoopadmin",
    version,
    about = "Manage the Scoop Nation food-ordering backend from the command line",
    long_about = "Administer banners, email templates, orders, customers, products\n\
        and shop settings against a Scoop Nation backend, with live order\n\
        notifications over the push feed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config file)
    #[arg(long, short = 'u', env = "SCOOPADMIN_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format (falls back to `defaults.output` from the config file)
    #[arg(long, short = 'o', env = "SCOOPADMIN_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output (falls back to `defaults.color`)
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SCOOPADMIN_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SCOOPADMIN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Page size to use when `--limit` is not passed. Filled from the
    /// config file's `defaults.limit` by [`GlobalOpts::apply_config`].
    #[arg(skip)]
    pub default_limit: u32,

    /// Base URL for uploaded media paths, from the config file.
    #[arg(skip)]
    pub media_base: String,
}

impl GlobalOpts {
    /// Fold config-file defaults into every flag the user did not pass.
    /// Explicit flags and environment variables always win.
    pub fn apply_config(&mut self, config: &scoopadmin_config::Config) {
        if self.output.is_none() {
            self.output = OutputFormat::from_str(&config.defaults.output, true).ok();
        }
        if self.color.is_none() {
            self.color = ColorMode::from_str(&config.defaults.color, true).ok();
        }
        self.default_limit = config.defaults.limit.max(1);
        self.media_base = config.media_base().trim_end_matches('/').to_owned();
    }

    /// Effective output format.
    pub fn output(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    /// Effective color mode.
    pub fn color(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Discard the stored session token
    Logout,

    /// Manage promotional banners
    #[command(alias = "ban")]
    Banners(BannersArgs),

    /// Manage transactional email templates
    #[command(alias = "tpl")]
    Templates(TemplatesArgs),

    /// View orders and update their status
    #[command(alias = "ord")]
    Orders(OrdersArgs),

    /// View and manage customers
    #[command(alias = "cust")]
    Customers(CustomersArgs),

    /// Manage the product catalog
    #[command(alias = "prod")]
    Products(ProductsArgs),

    /// View and update shop settings
    Settings(SettingsArgs),

    /// Show the dashboard summary
    #[command(alias = "dash")]
    Dashboard,

    /// Stream live order events from the push feed
    Watch(WatchArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination and search arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Results per page (falls back to `defaults.limit` from the config file)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Search text
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Admin account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Password (prompted interactively when omitted)
    #[arg(long, env = "SCOOPADMIN_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

// ── Banners ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BannersArgs {
    #[command(subcommand)]
    pub command: BannersCommand,
}

#[derive(Debug, Subcommand)]
pub enum BannersCommand {
    /// List banners
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get banner details
    Get {
        /// Banner id
        id: String,
    },

    /// Create a banner
    Create(BannerFormArgs),

    /// Update a banner
    Update {
        /// Banner id
        id: String,

        #[command(flatten)]
        form: BannerFormArgs,
    },

    /// Delete a banner
    #[command(alias = "rm")]
    Delete {
        /// Banner id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct BannerFormArgs {
    /// Banner title
    #[arg(long)]
    pub title: Option<String>,

    /// Link target (storefront path or URL)
    #[arg(long)]
    pub link: Option<String>,

    /// Image file to upload
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Schedule start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub starts: Option<String>,

    /// Schedule start time (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub starts_time: Option<String>,

    /// Schedule end date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub ends: Option<String>,

    /// Schedule end time (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub ends_time: Option<String>,

    /// Mark the banner active
    #[arg(long)]
    pub active: Option<bool>,
}

// ── Templates ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List email templates
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get template details
    Get {
        /// Template id
        id: String,
    },

    /// Create an email template
    Create(TemplateFormArgs),

    /// Update an email template
    Update {
        /// Template id
        id: String,

        #[command(flatten)]
        form: TemplateFormArgs,
    },

    /// Delete an email template
    #[command(alias = "rm")]
    Delete {
        /// Template id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct TemplateFormArgs {
    /// Template name (machine key, e.g. "order-confirmed")
    #[arg(long)]
    pub name: Option<String>,

    /// Email subject line
    #[arg(long)]
    pub subject: Option<String>,

    /// Email body text
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the email body from a file
    #[arg(long, value_name = "FILE")]
    pub body_file: Option<PathBuf>,
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List(OrdersListArgs),

    /// Get order details
    Get {
        /// Order id
        id: String,
    },

    /// Set the status of an order
    SetStatus {
        /// Order id
        id: String,

        /// New status (pending, confirmed, preparing, delivering, delivered, cancelled)
        status: String,
    },

    /// Delete an order
    #[command(alias = "rm")]
    Delete {
        /// Order id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct OrdersListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only show orders in this status
    #[arg(long)]
    pub status: Option<String>,
}

// ── Customers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get customer details
    Get {
        /// Customer id
        id: String,
    },

    /// Delete a customer
    #[command(alias = "rm")]
    Delete {
        /// Customer id
        id: String,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ProductsListArgs),

    /// Get product details
    Get {
        /// Product id
        id: String,
    },

    /// Create a product
    Create(ProductFormArgs),

    /// Update a product
    Update {
        /// Product id
        id: String,

        #[command(flatten)]
        form: ProductFormArgs,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ProductsListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only show products in this section
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProductFormArgs {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Description text
    #[arg(long)]
    pub description: Option<String>,

    /// Price (decimal, e.g. 4.50)
    #[arg(long)]
    pub price: Option<String>,

    /// Stock count
    #[arg(long)]
    pub stock: Option<String>,

    /// Storefront section key (e.g. "cones")
    #[arg(long)]
    pub section: Option<String>,

    /// Mark the product active
    #[arg(long)]
    pub active: Option<bool>,

    /// Image file(s) to upload
    #[arg(long, value_name = "FILE")]
    pub image: Vec<PathBuf>,
}

// ── Settings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current shop settings
    Show,

    /// Update shop settings
    Update {
        /// Shop display name
        #[arg(long)]
        name: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,

        /// Street address
        #[arg(long)]
        address: Option<String>,

        /// Currency code (e.g. EUR)
        #[arg(long)]
        currency: Option<String>,

        /// Delivery fee (decimal)
        #[arg(long)]
        delivery_fee: Option<f64>,
    },
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Give up after this many failed reconnect attempts
    #[arg(long)]
    pub max_retries: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_opts() -> GlobalOpts {
        GlobalOpts {
            api_url: None,
            output: None,
            color: None,
            verbose: 0,
            quiet: false,
            yes: false,
            insecure: false,
            timeout: None,
            default_limit: 0,
            media_base: String::new(),
        }
    }

    #[test]
    fn config_defaults_fill_unset_flags() {
        let mut config = scoopadmin_config::Config::default();
        config.defaults.output = "json".into();
        config.defaults.color = "never".into();
        config.defaults.limit = 25;
        config.media_url = Some("https://cdn.scoopnation.example/".into());

        let mut opts = bare_opts();
        opts.apply_config(&config);

        assert_eq!(opts.output(), OutputFormat::Json);
        assert_eq!(opts.color(), ColorMode::Never);
        assert_eq!(opts.default_limit, 25);
        assert_eq!(opts.media_base, "https://cdn.scoopnation.example");
    }

    #[test]
    fn explicit_flags_beat_config_defaults() {
        let mut config = scoopadmin_config::Config::default();
        config.defaults.output = "json".into();

        let mut opts = bare_opts();
        opts.output = Some(OutputFormat::Plain);
        opts.apply_config(&config);

        assert_eq!(opts.output(), OutputFormat::Plain);
    }

    #[test]
    fn unrecognized_config_default_falls_back_to_table() {
        let mut config = scoopadmin_config::Config::default();
        config.defaults.output = "yaml".into();
        config.defaults.limit = 0;

        let mut opts = bare_opts();
        opts.apply_config(&config);

        assert_eq!(opts.output(), OutputFormat::Table);
        assert_eq!(opts.default_limit, 1);
    }
}
