//! Shop settings command handlers.

use scoopadmin_core::Dispatcher;
use scoopadmin_core::model::CompanySettings;

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;

fn detail(s: &CompanySettings) -> String {
    let lines = vec![
        format!("Name:         {}", s.name),
        format!("Email:        {}", s.email.as_deref().unwrap_or("-")),
        format!("Phone:        {}", s.phone.as_deref().unwrap_or("-")),
        format!("Address:      {}", s.address.as_deref().unwrap_or("-")),
        format!("Currency:     {}", s.currency.as_deref().unwrap_or("-")),
        format!("Delivery fee: {:.2}", s.delivery_fee),
    ];
    lines.join("\n")
}

pub async fn handle(
    dispatcher: &Dispatcher,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SettingsCommand::Show => {
            dispatcher.fetch_settings().await?;
            let slice = dispatcher.store().settings.detail.get();
            let settings = slice.data.ok_or_else(|| CliError::Api {
                message: "settings record missing".into(),
                status: None,
            })?;
            let out =
                output::render_single(&global.output(), &settings, detail, |s| s.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SettingsCommand::Update {
            name,
            email,
            phone,
            address,
            currency,
            delivery_fee,
        } => {
            // Fetch first so unspecified fields keep their values.
            dispatcher.fetch_settings().await?;
            let slice = dispatcher.store().settings.detail.get();
            let mut settings = slice.data.ok_or_else(|| CliError::Api {
                message: "settings record missing".into(),
                status: None,
            })?;

            if let Some(name) = name {
                settings.name = name;
            }
            if let Some(email) = email {
                settings.email = Some(email);
            }
            if let Some(phone) = phone {
                settings.phone = Some(phone);
            }
            if let Some(address) = address {
                settings.address = Some(address);
            }
            if let Some(currency) = currency {
                settings.currency = Some(currency);
            }
            if let Some(delivery_fee) = delivery_fee {
                settings.delivery_fee = delivery_fee;
            }

            dispatcher.update_settings(&settings).await?;
            if !global.quiet {
                eprintln!("Settings updated");
            }
            Ok(())
        }
    }
}
