//! Email template command handlers.

use tabled::Tabled;

use scoopadmin_api::ResourceKind;
use scoopadmin_core::model::EmailTemplate;
use scoopadmin_core::{Dispatcher, EmailTemplateDraft, FormMode, SubmitOutcome, submit};

use crate::cli::{GlobalOpts, TemplateFormArgs, TemplatesArgs, TemplatesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&EmailTemplate> for TemplateRow {
    fn from(t: &EmailTemplate) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            subject: t.subject.clone(),
            updated: util::fmt_time(t.updated_at.as_ref()),
        }
    }
}

fn detail(t: &EmailTemplate) -> String {
    format!(
        "ID:      {}\nName:    {}\nSubject: {}\nUpdated: {}\n\n{}",
        t.id,
        t.name,
        t.subject,
        util::fmt_time(t.updated_at.as_ref()),
        t.body
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dispatcher: &Dispatcher,
    args: TemplatesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TemplatesCommand::List(list) => {
            let ctl = util::controller_from_args(
                ResourceKind::EmailTemplates,
                &list,
                global.default_limit,
            );
            dispatcher
                .fetch_list(ResourceKind::EmailTemplates, &ctl.query())
                .await?;

            let slice = dispatcher.store().email_templates.list.get();
            let out = output::render_list(
                &global.output(),
                &slice.items,
                |t| TemplateRow::from(t),
                |t| t.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if let Some(ref pagination) = slice.pagination {
                output::print_range_footer(&global.output(), pagination, global.quiet);
            }
            Ok(())
        }

        TemplatesCommand::Get { id } => {
            dispatcher
                .fetch_detail(ResourceKind::EmailTemplates, &id)
                .await?;
            let slice = dispatcher.store().email_templates.detail.get();
            let template = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Email template".into(),
                id,
                list_command: "templates list".into(),
            })?;
            let out = output::render_single(&global.output(), &template, detail, |t| t.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TemplatesCommand::Create(form) => {
            let draft = draft_from_args(EmailTemplateDraft::default(), form)?;
            let outcome = submit(dispatcher, &draft, FormMode::Create).await?;
            if let SubmitOutcome::Created { id } = outcome {
                if !global.quiet {
                    eprintln!("Email template created: {id}");
                }
            }
            Ok(())
        }

        TemplatesCommand::Update { id, form } => {
            dispatcher
                .fetch_detail(ResourceKind::EmailTemplates, &id)
                .await?;
            let slice = dispatcher.store().email_templates.detail.get();
            let template = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Email template".into(),
                id: id.clone(),
                list_command: "templates list".into(),
            })?;

            let draft = draft_from_args(EmailTemplateDraft::from_template(&template), form)?;
            submit(dispatcher, &draft, FormMode::Edit { id }).await?;
            if !global.quiet {
                eprintln!("Email template updated");
            }
            Ok(())
        }

        TemplatesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete email template {id}?"), global.yes)? {
                return Ok(());
            }
            dispatcher.delete(ResourceKind::EmailTemplates, &id).await?;
            if !global.quiet {
                eprintln!("Email template deleted");
            }
            Ok(())
        }
    }
}

fn draft_from_args(
    mut draft: EmailTemplateDraft,
    form: TemplateFormArgs,
) -> Result<EmailTemplateDraft, CliError> {
    if let Some(name) = form.name {
        draft.name = name;
    }
    if let Some(subject) = form.subject {
        draft.subject = subject;
    }
    if let Some(body) = form.body {
        draft.body = body;
    } else if let Some(ref path) = form.body_file {
        draft.body = std::fs::read_to_string(path)?;
    }
    Ok(draft)
}
