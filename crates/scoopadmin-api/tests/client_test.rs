// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scoopadmin_api::{
    ApiClient, Error, ListQuery, MutationBody, ResourceKind, SessionStore,
};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestBanner {
    id: String,
    title: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

fn session_in(dir: &tempfile::TempDir) -> Arc<SessionStore> {
    Arc::new(SessionStore::open(dir.path().join("session.json")))
}

async fn setup() -> (MockServer, ApiClient, tempfile::TempDir) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session = session_in(&dir);
    session
        .store(secrecy::SecretString::from("test-token".to_owned()), None)
        .expect("store token");
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new(), session)
        .expect("client");
    (server, client, dir)
}

fn banner_list_body(count: usize, total: u64, page: u32, limit: u32) -> serde_json::Value {
    let items: Vec<_> = (0..count)
        .map(|i| json!({ "id": format!("b-{i}"), "title": format!("Banner {i}") }))
        .collect();
    json!({
        "success": true,
        "data": items,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "total_pages": total.div_ceil(u64::from(limit)),
        }
    })
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_unwraps_envelope_and_pagination() {
    let (server, client, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/banners"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banner_list_body(10, 25, 1, 10)))
        .mount(&server)
        .await;

    let page = client
        .list::<TestBanner>(ResourceKind::Banners, &ListQuery::new().page(1).limit(10))
        .await
        .expect("list");

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.items[0].title, "Banner 0");
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.total_pages, 3);
}

#[tokio::test]
async fn empty_search_is_not_sent_to_backend() {
    let (server, client, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [],
            "pagination": { "page": 1, "limit": 10, "total": 0, "total_pages": 0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::new().search("");
    client
        .list::<serde_json::Value>(ResourceKind::Products, &query)
        .await
        .expect("list");
}

// ── Detail ──────────────────────────────────────────────────────────

#[tokio::test]
async fn detail_success_false_surfaces_message_verbatim() {
    let (server, client, _dir) = setup().await;

    // 2xx body with success:false -- the application-error case.
    Mock::given(method("GET"))
        .and(path("/api/banners/get"))
        .and(query_param("id", "99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "not found"
        })))
        .mount(&server)
        .await;

    let err = client
        .get_by_id::<TestBanner>(ResourceKind::Banners, "99")
        .await
        .expect_err("should fail");

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 200);
            assert_eq!(message, "not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_new_record() {
    let (server, client, _dir) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/email-templates/create"))
        .and(body_json(json!({ "name": "welcome", "subject": "Hi", "body": "..." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "created",
            "data": { "id": "t-7", "title": "welcome" }
        })))
        .mount(&server)
        .await;

    let created: TestBanner = client
        .create(
            ResourceKind::EmailTemplates,
            MutationBody::Json(json!({ "name": "welcome", "subject": "Hi", "body": "..." })),
        )
        .await
        .expect("create");

    assert_eq!(created.id, "t-7");
}

#[tokio::test]
async fn create_with_attachment_goes_multipart() {
    let (server, client, _dir) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/banners/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": "b-1", "title": "Summer" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = MutationBody::Multipart {
        fields: vec![("title".to_owned(), "Summer".to_owned())],
        attachments: vec![scoopadmin_api::Attachment {
            field: "image".to_owned(),
            file_name: "summer.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }],
    };

    let created: TestBanner = client
        .create(ResourceKind::Banners, body)
        .await
        .expect("create");
    assert_eq!(created.id, "b-1");

    let requests = server.received_requests().await.expect("requests");
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn delete_sends_id_body() {
    let (server, client, _dir) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/banners/delete"))
        .and(body_json(json!({ "id": "42" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "banner removed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client
        .delete(ResourceKind::Banners, "42")
        .await
        .expect("delete");
    assert_eq!(ack.message.as_deref(), Some("banner removed"));
}

// ── 401 teardown ────────────────────────────────────────────────────

#[tokio::test]
async fn any_401_clears_the_stored_session() {
    let (server, client, dir) = setup().await;
    let session_path = dir.path().join("session.json");
    assert!(session_path.exists());

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .list::<serde_json::Value>(ResourceKind::Orders, &ListQuery::new())
        .await
        .expect_err("should fail");

    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated());
    assert!(!session_path.exists());
}

#[tokio::test]
async fn garbled_multibyte_body_reports_contract_violation() {
    let (server, client, _dir) = setup().await;

    // A 2xx body that is not JSON, with multi-byte characters placed so
    // a naive byte-indexed preview would land mid-character.
    let body = format!("not json {}", "é".repeat(150));
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let err = client
        .list::<serde_json::Value>(ResourceKind::Customers, &ListQuery::new())
        .await
        .expect_err("should fail");

    match err {
        Error::Deserialization { message, .. } => {
            assert!(message.contains("body preview"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Non-2xx envelope ────────────────────────────────────────────────

#[tokio::test]
async fn server_error_extracts_envelope_message() {
    let (server, client, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "aggregation pipeline failed"
        })))
        .mount(&server)
        .await;

    let err = client
        .list::<serde_json::Value>(ResourceKind::Customers, &ListQuery::new())
        .await
        .expect_err("should fail");

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "aggregation pipeline failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn login_persists_token_used_by_later_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session = session_in(&dir);
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new(), session)
        .expect("client");

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "admin@scoopnation.test", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "token": "fresh-token",
                "user": { "id": "u1", "email": "admin@scoopnation.test" }
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/banners"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banner_list_body(0, 0, 1, 10)))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .login("admin@scoopnation.test", "hunter2")
        .await
        .expect("login");
    assert_eq!(user.expect("user").id, "u1");
    assert!(client.session().is_authenticated());

    client
        .list::<TestBanner>(ResourceKind::Banners, &ListQuery::new())
        .await
        .expect("list after login");
}

#[tokio::test]
async fn login_401_is_bad_credentials_not_teardown() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new(), session_in(&dir))
        .expect("client");

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.login("x@y.z", "nope").await.expect_err("should fail");
    assert!(matches!(err, Error::LoginFailed { .. }));
}
