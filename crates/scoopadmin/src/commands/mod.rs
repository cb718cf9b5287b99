//! Command dispatch: bridges CLI args -> core dispatcher -> output formatting.

pub mod banners;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod session;
pub mod settings;
pub mod templates;
pub mod util;
pub mod watch;

use scoopadmin_core::Dispatcher;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dispatcher: &Dispatcher,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(dispatcher, args, global).await,
        Command::Logout => session::logout(dispatcher, global),
        Command::Banners(args) => banners::handle(dispatcher, args, global).await,
        Command::Templates(args) => templates::handle(dispatcher, args, global).await,
        Command::Orders(args) => orders::handle(dispatcher, args, global).await,
        Command::Customers(args) => customers::handle(dispatcher, args, global).await,
        Command::Products(args) => products::handle(dispatcher, args, global).await,
        Command::Settings(args) => settings::handle(dispatcher, args, global).await,
        Command::Dashboard => dashboard::handle(dispatcher, global).await,
        Command::Watch(args) => watch::handle(dispatcher, args, global).await,
    }
}
