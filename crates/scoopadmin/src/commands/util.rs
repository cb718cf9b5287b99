//! Shared helpers for command handlers.

use std::path::Path;

use chrono::{DateTime, Utc};

use scoopadmin_api::{Attachment, ResourceKind};
use scoopadmin_core::ListController;

use crate::cli::ListArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Build a list controller from the shared pagination/search flags.
/// `default_limit` is the config-file page size used when `--limit`
/// was not passed.
pub fn controller_from_args(kind: ResourceKind, args: &ListArgs, default_limit: u32) -> ListController {
    let mut ctl = ListController::new(kind);
    ctl.set_limit(args.limit.unwrap_or(default_limit).max(1));
    if let Some(ref search) = args.search {
        ctl.set_search(search.clone());
    }
    // Page comes last: search/limit changes reset it.
    ctl.set_page(args.page, None);
    ctl
}

/// Absolute URL for a stored media path. Paths that are already
/// absolute URLs pass through untouched.
pub fn media_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base.is_empty() {
        return path.to_owned();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Read a file into an upload attachment for the given form field.
pub fn load_attachment(field: &str, path: &Path) -> Result<Attachment, CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".into());
    Ok(Attachment {
        field: field.to_owned(),
        content_type: mime_for_path(path).to_owned(),
        file_name,
        bytes,
    })
}

/// Guess the image MIME type from the file extension.
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        // The backend only serves raster images; PNG is the safe default.
        _ => "image/png",
    }
}

/// Render an optional timestamp for table cells.
pub fn fmt_time(time: Option<&DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guess_covers_common_extensions() {
        assert_eq!(mime_for_path(Path::new("hero.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("hero.webp")), "image/webp");
        assert_eq!(mime_for_path(Path::new("hero")), "image/png");
    }

    #[test]
    fn controller_honors_flag_order() {
        let ctl = controller_from_args(
            ResourceKind::Products,
            &ListArgs {
                page: 3,
                limit: Some(25),
                search: Some("cone".into()),
            },
            10,
        );
        assert_eq!(ctl.page(), 3);
        assert_eq!(ctl.limit(), 25);
        assert_eq!(ctl.search(), "cone");
    }

    #[test]
    fn controller_uses_config_limit_when_flag_absent() {
        let args = ListArgs {
            page: 1,
            limit: None,
            search: None,
        };
        let ctl = controller_from_args(ResourceKind::Orders, &args, 25);
        assert_eq!(ctl.limit(), 25);

        let ctl = controller_from_args(
            ResourceKind::Orders,
            &ListArgs {
                limit: Some(5),
                ..args
            },
            25,
        );
        assert_eq!(ctl.limit(), 5);
    }

    #[test]
    fn media_url_joins_relative_paths_only() {
        let base = "https://cdn.scoopnation.example";
        assert_eq!(
            media_url(base, "/uploads/cone.png"),
            "https://cdn.scoopnation.example/uploads/cone.png"
        );
        assert_eq!(
            media_url(base, "https://elsewhere.example/x.png"),
            "https://elsewhere.example/x.png"
        );
        assert_eq!(media_url("", "uploads/cone.png"), "uploads/cone.png");
    }
}
