// ── Banner form draft ──

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::json;

use scoopadmin_api::{Attachment, MutationBody, ResourceKind};

use super::{Draft, FormMode, ValidationErrors, Validator, push_opt};

/// Draft input for the banner create/edit form.
///
/// Schedule bounds are entered as separate date and time fields and
/// recombined into one UTC instant here. The image is required for a
/// new banner; an edit may keep the already-uploaded one.
#[derive(Debug, Clone, Default)]
pub struct BannerDraft {
    pub title: String,
    pub link: String,
    /// `YYYY-MM-DD`, empty to leave the bound open.
    pub starts_date: String,
    /// `HH:MM`, defaults to midnight when the date is set.
    pub starts_time: String,
    pub ends_date: String,
    pub ends_time: String,
    pub active: bool,
    /// Image path already stored on the record being edited.
    pub existing_image: Option<String>,
    /// Newly picked image file, if any.
    pub image: Option<Attachment>,
}

impl BannerDraft {
    /// Prefill a draft from an existing record for editing.
    pub fn from_banner(banner: &crate::model::Banner) -> Self {
        let (starts_date, starts_time) = split_instant(banner.starts_at.as_ref());
        let (ends_date, ends_time) = split_instant(banner.ends_at.as_ref());
        Self {
            title: banner.title.clone(),
            link: banner.link.clone().unwrap_or_default(),
            starts_date,
            starts_time,
            ends_date,
            ends_time,
            active: banner.active,
            existing_image: banner.image.clone(),
            image: None,
        }
    }
}

impl Draft for BannerDraft {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Banners
    }

    fn build(&self, mode: &FormMode) -> Result<MutationBody, ValidationErrors> {
        let mut v = Validator::default();
        v.require("title", &self.title);

        // A banner is a visual: it must have an image from somewhere.
        if self.image.is_none() && self.existing_image.is_none() {
            v.push("image", "an image is required");
        }

        let starts_at = combine_instant(&mut v, "startsAt", &self.starts_date, &self.starts_time);
        let ends_at = combine_instant(&mut v, "endsAt", &self.ends_date, &self.ends_time);
        if let (Some(start), Some(end)) = (&starts_at, &ends_at) {
            if end <= start {
                v.push("endsAt", "must be after the start");
            }
        }

        v.finish()?;

        if let Some(image) = &self.image {
            let mut fields = Vec::new();
            if let FormMode::Edit { id } = mode {
                fields.push(("id".to_owned(), id.clone()));
            }
            fields.push(("title".to_owned(), self.title.trim().to_owned()));
            push_opt(&mut fields, "link", &self.link);
            if let Some(instant) = &starts_at {
                fields.push(("startsAt".to_owned(), instant.clone()));
            }
            if let Some(instant) = &ends_at {
                fields.push(("endsAt".to_owned(), instant.clone()));
            }
            fields.push(("active".to_owned(), self.active.to_string()));

            Ok(MutationBody::Multipart {
                fields,
                attachments: vec![image.clone()],
            })
        } else {
            let mut body = json!({
                "title": self.title.trim(),
                "active": self.active,
            });
            if let FormMode::Edit { id } = mode {
                body["id"] = json!(id);
            }
            if !self.link.trim().is_empty() {
                body["link"] = json!(self.link.trim());
            }
            if let Some(instant) = &starts_at {
                body["startsAt"] = json!(instant);
            }
            if let Some(instant) = &ends_at {
                body["endsAt"] = json!(instant);
            }
            Ok(MutationBody::Json(body))
        }
    }
}

/// Combine a date and time field into an RFC 3339 UTC instant.
///
/// An empty date leaves the bound open (and an orphaned time is an
/// error); an empty time defaults to midnight.
fn combine_instant(
    v: &mut Validator,
    field: &'static str,
    date: &str,
    time: &str,
) -> Option<String> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() {
        if !time.is_empty() {
            v.push(field, "a time needs a date");
        }
        return None;
    }

    let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        v.push(field, "date must be YYYY-MM-DD");
        return None;
    };
    let time = if time.is_empty() {
        NaiveTime::MIN
    } else {
        match NaiveTime::parse_from_str(time, "%H:%M") {
            Ok(t) => t,
            Err(_) => {
                v.push(field, "time must be HH:MM");
                return None;
            }
        }
    };

    Some(
        Utc.from_utc_datetime(&date.and_time(time))
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    )
}

/// Split a stored instant back into form date/time fields.
fn split_instant(instant: Option<&chrono::DateTime<Utc>>) -> (String, String) {
    match instant {
        Some(dt) => (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%H:%M").to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
