// REST client for the admin backend.
//
// Wraps `reqwest::Client` with bearer-session injection, canonical
// envelope unwrapping, and the forced session teardown on 401. All
// five collection resources share the same generic endpoints; the
// settings singleton and the dashboard summary ride the same envelope.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::envelope::{Envelope, PageOf, Pagination};
use crate::error::Error;
use crate::query::ListQuery;
use crate::resource::{MutationBody, ResourceKind};
use crate::session::{SessionStore, SessionUser};
use crate::transport::TransportConfig;

/// Payload of a successful login.
#[derive(Debug, serde::Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Acknowledgement from a mutation endpoint that returns no record.
#[derive(Debug, Clone)]
pub struct AckMessage {
    pub message: Option<String>,
}

/// Async client for the Scoop Nation admin REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build from a base URL, transport config, and session store.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        session: Arc<SessionStore>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Wrap an existing `reqwest::Client` (tests inject their own).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        session: Arc<SessionStore>,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The shared session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/banners"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `api/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// Attach the bearer token, if a session exists.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── Collection resources ─────────────────────────────────────────

    /// `GET /api/{resource}` with pagination/search/filters.
    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> Result<PageOf<T>, Error> {
        let url = self.url(&format!("api/{}", kind.path_segment()));
        let params = query.to_params();
        debug!(%url, ?params, "GET list");

        let resp = self
            .authorize(self.http.get(url).query(&params))
            .send()
            .await?;
        let envelope: Envelope<Vec<T>> = self.read_envelope(resp).await?;

        let items = envelope.data.unwrap_or_default();
        // A list response without pagination violates the contract;
        // synthesize a single-page block so callers stay consistent.
        let pagination = envelope.pagination.unwrap_or_else(|| {
            warn!(resource = %kind, "list response missing pagination block");
            let total = items.len() as u64;
            Pagination::compute(1, u32::try_from(total.max(1)).unwrap_or(u32::MAX), total)
        });

        Ok(PageOf { items, pagination })
    }

    /// `GET /api/{resource}/get?id={id}`.
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<T, Error> {
        let url = self.url(&format!("api/{}/get", kind.path_segment()));
        debug!(%url, id, "GET detail");

        let resp = self
            .authorize(self.http.get(url).query(&[("id", id)]))
            .send()
            .await?;
        let envelope: Envelope<T> = self.read_envelope(resp).await?;
        expect_data(envelope)
    }

    /// `POST /api/{resource}/create`. Returns the created record.
    pub async fn create<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        body: MutationBody,
    ) -> Result<T, Error> {
        let url = self.url(&format!("api/{}/create", kind.path_segment()));
        debug!(%url, multipart = body.is_multipart(), "POST create");

        let resp = self.send_mutation(self.http.post(url), body).await?;
        let envelope: Envelope<T> = self.read_envelope(resp).await?;
        expect_data(envelope)
    }

    /// `POST /api/{resource}/update`. The body must carry the id.
    pub async fn update(
        &self,
        kind: ResourceKind,
        body: MutationBody,
    ) -> Result<AckMessage, Error> {
        let url = self.url(&format!("api/{}/update", kind.path_segment()));
        debug!(%url, multipart = body.is_multipart(), "POST update");

        let resp = self.send_mutation(self.http.post(url), body).await?;
        let envelope: Envelope<serde_json::Value> = self.read_envelope(resp).await?;
        Ok(AckMessage {
            message: envelope.message,
        })
    }

    /// `DELETE /api/{resource}/delete` with an `{ id }` body.
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<AckMessage, Error> {
        let url = self.url(&format!("api/{}/delete", kind.path_segment()));
        debug!(%url, id, "DELETE");

        let resp = self
            .authorize(self.http.delete(url).json(&serde_json::json!({ "id": id })))
            .send()
            .await?;
        let envelope: Envelope<serde_json::Value> = self.read_envelope(resp).await?;
        Ok(AckMessage {
            message: envelope.message,
        })
    }

    // ── Settings singleton & dashboard ───────────────────────────────

    /// `GET /api/settings/get`.
    pub async fn settings_get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let url = self.url("api/settings/get");
        debug!(%url, "GET settings");

        let resp = self.authorize(self.http.get(url)).send().await?;
        let envelope: Envelope<T> = self.read_envelope(resp).await?;
        expect_data(envelope)
    }

    /// `POST /api/settings/update`.
    pub async fn settings_update<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<AckMessage, Error> {
        let url = self.url("api/settings/update");
        debug!(%url, "POST settings update");

        let resp = self.authorize(self.http.post(url).json(body)).send().await?;
        let envelope: Envelope<serde_json::Value> = self.read_envelope(resp).await?;
        Ok(AckMessage {
            message: envelope.message,
        })
    }

    /// `GET /api/dashboard/summary`.
    pub async fn dashboard_summary<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let url = self.url("api/dashboard/summary");
        debug!(%url, "GET dashboard summary");

        let resp = self.authorize(self.http.get(url)).send().await?;
        let envelope: Envelope<T> = self.read_envelope(resp).await?;
        expect_data(envelope)
    }

    // ── Authentication ───────────────────────────────────────────────

    /// `POST /api/auth/login`. Persists the returned token + user.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<SessionUser>, Error> {
        let url = self.url("api/auth/login");
        debug!(%url, email, "POST login");

        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        // A 401 here means bad credentials, not an expired session --
        // don't run the generic teardown path.
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::LoginFailed {
                message: "invalid email or password".into(),
            });
        }

        let envelope: Envelope<LoginData> = parse_envelope(status, resp).await?;
        let data = expect_data(envelope)?;
        self.session
            .store(secrecy::SecretString::from(data.token), data.user.clone())?;
        Ok(data.user)
    }

    /// Local session teardown. No backend call.
    pub fn logout(&self) -> Result<(), Error> {
        self.session.clear()
    }

    // ── Request/response plumbing ────────────────────────────────────

    async fn send_mutation(
        &self,
        builder: reqwest::RequestBuilder,
        body: MutationBody,
    ) -> Result<reqwest::Response, Error> {
        let builder = match body {
            MutationBody::Json(value) => builder.json(&value),
            MutationBody::Multipart {
                fields,
                attachments,
            } => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for attachment in attachments {
                    let part = reqwest::multipart::Part::bytes(attachment.bytes)
                        .file_name(attachment.file_name)
                        .mime_str(&attachment.content_type)?;
                    form = form.part(attachment.field, part);
                }
                builder.multipart(form)
            }
        };
        Ok(self.authorize(builder).send().await?)
    }

    /// Normalize a response into the canonical envelope, running the
    /// 401 teardown first.
    async fn read_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Envelope<T>, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("received 401, tearing down stored session");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "session teardown failed");
            }
            return Err(Error::Unauthorized);
        }

        parse_envelope(status, resp).await
    }
}

async fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    resp: reqwest::Response,
) -> Result<Envelope<T>, Error> {
    let body = resp.text().await?;

    if !status.is_success() {
        // Non-2xx bodies usually still carry the envelope; pull the
        // message out if we can.
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|env| env.failure_message())
            .unwrap_or_else(|| status.to_string());
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
        let preview = truncate_preview(&body);
        warn!(error = %e, preview, "envelope contract violation");
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })?;

    if !envelope.success {
        return Err(Error::Api {
            status: status.as_u16(),
            message: envelope
                .failure_message()
                .unwrap_or_else(|| "request failed".into()),
        });
    }

    Ok(envelope)
}

/// First ~200 bytes of a body for log/error context, backed off to a
/// char boundary so multi-byte UTF-8 never splits.
fn truncate_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Unwrap `data` from a `success:true` envelope; a missing `data`
/// block is a contract violation.
fn expect_data<T>(envelope: Envelope<T>) -> Result<T, Error> {
    envelope.data.ok_or_else(|| Error::Deserialization {
        message: "success envelope missing data field".into(),
        body: String::new(),
    })
}

/// Parse the base URL and ensure a trailing slash for joining.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::truncate_preview;

    #[test]
    fn preview_truncates_long_ascii_bodies() {
        let body = "x".repeat(500);
        assert_eq!(truncate_preview(&body).len(), 200);
        assert_eq!(truncate_preview("short"), "short");
    }

    #[test]
    fn preview_backs_off_mid_character_cuts() {
        // "é" is two bytes; byte 200 lands inside one.
        let body = format!("x{}", "é".repeat(150));
        let preview = truncate_preview(&body);
        assert!(preview.len() < 200);
        assert!(body.starts_with(preview));
    }
}
