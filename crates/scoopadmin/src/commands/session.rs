//! Login / logout handlers.

use scoopadmin_core::Dispatcher;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;

pub async fn login(
    dispatcher: &Dispatcher,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let user = dispatcher.client().login(&args.email, &password).await?;

    if !global.quiet {
        match user {
            Some(user) => eprintln!("Signed in as {}", user.email),
            None => eprintln!("Signed in"),
        }
    }
    Ok(())
}

pub fn logout(dispatcher: &Dispatcher, global: &GlobalOpts) -> Result<(), CliError> {
    dispatcher.client().logout()?;
    if !global.quiet {
        eprintln!("Signed out");
    }
    Ok(())
}
