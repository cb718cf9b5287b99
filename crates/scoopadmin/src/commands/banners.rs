//! Banner command handlers.

use tabled::Tabled;

use scoopadmin_api::ResourceKind;
use scoopadmin_core::model::Banner;
use scoopadmin_core::{BannerDraft, Dispatcher, FormMode, SubmitOutcome, submit};

use crate::cli::{BannerFormArgs, BannersArgs, BannersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BannerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Ends")]
    ends: String,
}

impl From<&Banner> for BannerRow {
    fn from(b: &Banner) -> Self {
        Self {
            id: b.id.clone(),
            title: b.title.clone(),
            active: b.active,
            starts: util::fmt_time(b.starts_at.as_ref()),
            ends: util::fmt_time(b.ends_at.as_ref()),
        }
    }
}

fn detail(b: &Banner, media_base: &str) -> String {
    let image = b
        .image
        .as_deref()
        .map_or_else(|| "-".into(), |path| util::media_url(media_base, path));
    let lines = vec![
        format!("ID:      {}", b.id),
        format!("Title:   {}", b.title),
        format!("Image:   {image}"),
        format!("Link:    {}", b.link.as_deref().unwrap_or("-")),
        format!("Starts:  {}", util::fmt_time(b.starts_at.as_ref())),
        format!("Ends:    {}", util::fmt_time(b.ends_at.as_ref())),
        format!("Active:  {}", b.active),
        format!("Created: {}", util::fmt_time(b.created_at.as_ref())),
    ];
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dispatcher: &Dispatcher,
    args: BannersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BannersCommand::List(list) => {
            let ctl = util::controller_from_args(ResourceKind::Banners, &list, global.default_limit);
            dispatcher
                .fetch_list(ResourceKind::Banners, &ctl.query())
                .await?;

            let slice = dispatcher.store().banners.list.get();
            let out = output::render_list(
                &global.output(),
                &slice.items,
                |b| BannerRow::from(b),
                |b| b.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if let Some(ref pagination) = slice.pagination {
                output::print_range_footer(&global.output(), pagination, global.quiet);
            }
            Ok(())
        }

        BannersCommand::Get { id } => {
            dispatcher.fetch_detail(ResourceKind::Banners, &id).await?;
            let slice = dispatcher.store().banners.detail.get();
            let banner = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Banner".into(),
                id,
                list_command: "banners list".into(),
            })?;
            let out = output::render_single(
                &global.output(),
                &banner,
                |b| detail(b, &global.media_base),
                |b| b.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BannersCommand::Create(form) => {
            let draft = draft_from_args(BannerDraft::default(), form)?;
            let outcome = submit(dispatcher, &draft, FormMode::Create).await?;
            if let SubmitOutcome::Created { id } = outcome {
                if !global.quiet {
                    eprintln!("Banner created: {id}");
                }
            }
            Ok(())
        }

        BannersCommand::Update { id, form } => {
            dispatcher.fetch_detail(ResourceKind::Banners, &id).await?;
            let slice = dispatcher.store().banners.detail.get();
            let banner = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Banner".into(),
                id: id.clone(),
                list_command: "banners list".into(),
            })?;

            let draft = draft_from_args(BannerDraft::from_banner(&banner), form)?;
            submit(dispatcher, &draft, FormMode::Edit { id }).await?;
            if !global.quiet {
                eprintln!("Banner updated");
            }
            Ok(())
        }

        BannersCommand::Delete { id } => {
            if !util::confirm(&format!("Delete banner {id}?"), global.yes)? {
                return Ok(());
            }
            dispatcher.delete(ResourceKind::Banners, &id).await?;
            if !global.quiet {
                eprintln!("Banner deleted");
            }
            Ok(())
        }
    }
}

/// Overlay form flags onto a draft (prefilled for updates, blank for
/// creates). Flags the user did not pass keep the prefill values.
fn draft_from_args(mut draft: BannerDraft, form: BannerFormArgs) -> Result<BannerDraft, CliError> {
    if let Some(title) = form.title {
        draft.title = title;
    }
    if let Some(link) = form.link {
        draft.link = link;
    }
    if let Some(starts) = form.starts {
        draft.starts_date = starts;
    }
    if let Some(starts_time) = form.starts_time {
        draft.starts_time = starts_time;
    }
    if let Some(ends) = form.ends {
        draft.ends_date = ends;
    }
    if let Some(ends_time) = form.ends_time {
        draft.ends_time = ends_time;
    }
    if let Some(active) = form.active {
        draft.active = active;
    }
    if let Some(ref path) = form.image {
        draft.image = Some(util::load_attachment("image", path)?);
    }
    Ok(draft)
}
