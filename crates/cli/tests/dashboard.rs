//! Router-level tests for the local dashboard

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

use common::prelude::{ConfigStore, ProjectConfig, Storage, StorageError};
use epic_cli::http_server::router;
use epic_cli::http_server::session::SESSION_COOKIE;
use epic_cli::{DashboardSession, StorageProvider, UiState};

#[derive(Debug, Clone)]
struct FixedStorage(Storage);

#[async_trait]
impl StorageProvider for FixedStorage {
    async fn storage(&self, _session: &DashboardSession) -> Result<Storage, StorageError> {
        Ok(self.0.clone())
    }
}

fn project(name: &str, api_url: &str, identity_url: Option<&str>) -> ProjectConfig {
    ProjectConfig {
        name: name.to_string(),
        api_base_url: api_url.to_string(),
        identity_pool_client_id: "client-id".to_string(),
        identity_pool_id: None,
        storage_bucket_name: Some("demo-data".to_string()),
        job_queue_name: None,
        region: "eu-west-2".to_string(),
        username: "alice".to_string(),
        password: Some("hunter2".to_string()),
        identity_endpoint: identity_url.map(|u| Url::parse(u).unwrap()),
        extra: BTreeMap::new(),
    }
}

struct Harness {
    state: UiState,
    storage: Storage,
    _dir: TempDir,
}

impl Harness {
    fn new(projects: Vec<ProjectConfig>) -> Self {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::at(dir.path().join("config"));
        for p in projects {
            store.upsert(p).unwrap();
        }
        let storage = Storage::in_memory();
        let state = UiState::with_storage(
            store,
            Duration::from_secs(60),
            Arc::new(FixedStorage(storage.clone())),
        );
        Self {
            state,
            storage,
            _dir: dir,
        }
    }

    /// A session cookie for `project`, bypassing the identity provider.
    fn login(&self, project: ProjectConfig) -> String {
        let id = self
            .state
            .login(DashboardSession::new(project, "token".to_string()));
        format!("{}={}", SESSION_COOKIE, id)
    }

    async fn send(&self, request: Request<Body>) -> Response {
        router(self.state.clone()).oneshot(request).await.unwrap()
    }
}

fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn seed(storage: &Storage) {
    for (key, data) in [
        ("reports/a.csv", "1,2,3\n"),
        ("reports/b.csv", "4\n"),
        ("notes.txt", "hello"),
    ] {
        storage.put(key, Bytes::from(data)).await.unwrap();
    }
}

#[tokio::test]
async fn test_liveness() {
    let h = Harness::new(vec![]);
    let response = h.send(get_req("/_status/livez", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unknown_page_not_found() {
    let h = Harness::new(vec![]);
    let response = h.send(get_req("/nope", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn test_unknown_api_route_is_json() {
    let h = Harness::new(vec![]);
    let response = h.send(get_req("/api/nope", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "No such endpoint: GET /api/nope"})
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/s3/nope")
        .body(Body::empty())
        .unwrap();
    let response = h.send(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "No such endpoint: POST /api/s3/nope"})
    );
}

#[tokio::test]
async fn test_api_requires_session() {
    let h = Harness::new(vec![]);
    for uri in ["/api/jobs", "/api/billing", "/api/s3/list", "/api/s3/bucket-size"] {
        let response = h.send(get_req(uri, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body_json(response).await, json!({"error": "Not logged in"}));
    }

    // A well-formed cookie for a session that never existed
    let stale = format!("{}={}", SESSION_COOKIE, uuid::Uuid::new_v4());
    let response = h.send(get_req("/api/jobs", Some(&stale))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_index_lists_projects() {
    let h = Harness::new(vec![
        project("beta", "http://127.0.0.1:9", None),
        project("alpha", "http://127.0.0.1:9", None),
    ]);
    let response = h.send(get_req("/?error=Login%20failed", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    let alpha = html.find("/select_project/alpha").unwrap();
    let beta = html.find("/select_project/beta").unwrap();
    assert!(alpha < beta);
    assert!(html.contains("Login failed"));
}

#[tokio::test]
async fn test_dashboard_redirects_without_session() {
    let h = Harness::new(vec![]);
    let response = h.send(get_req("/dashboard", None)).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_dashboard_renders_for_session() {
    let h = Harness::new(vec![]);
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));
    let response = h.send(get_req("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("demo"));
    assert!(html.contains("alice"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let h = Harness::new(vec![]);
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h.send(get_req("/logout", Some(&cookie))).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/");

    let response = h.send(get_req("/api/jobs", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_static_assets() {
    let h = Harness::new(vec![]);
    let response = h.send(get_req("/static/style.css", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let response = h.send(get_req("/static/missing.js", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Accepts `alice` / `hunter2` and rejects everything else.
fn identity_provider() -> Router {
    Router::new().route(
        "/",
        post(|body: String| async move {
            let body: Value = serde_json::from_str(&body).unwrap();
            if body["AuthParameters"]["PASSWORD"] == "hunter2" {
                (
                    StatusCode::OK,
                    Json(json!({"AuthenticationResult": {"IdToken": "id-token", "ExpiresIn": 3600}})),
                )
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "__type": "NotAuthorizedException",
                        "message": "Incorrect username or password."
                    })),
                )
            }
        }),
    )
}

fn jobs_api() -> Router {
    Router::new().route(
        "/job/",
        get(|headers: axum::http::HeaderMap| async move {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert_eq!(auth, "Bearer id-token");
            Json(json!({"results": [{"uuid": "j1", "name": "solve", "status": "RUNNING"}]}))
        }),
    )
}

#[tokio::test]
async fn test_select_project_logs_in() {
    let identity = spawn(identity_provider()).await;
    let api = spawn(jobs_api()).await;
    let h = Harness::new(vec![project("demo", &api, Some(&identity))]);

    let response = h.send(get_req("/select_project/demo", None)).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/dashboard");

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    let cookie = set_cookie.split(';').next().unwrap().to_string();
    assert!(cookie.starts_with(SESSION_COOKIE));
    assert!(set_cookie.contains("HttpOnly"));

    let response = h.send(get_req("/api/jobs", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let jobs = body_json(response).await;
    assert_eq!(jobs[0]["uuid"], "j1");
}

#[tokio::test]
async fn test_select_project_with_bad_password() {
    let identity = spawn(identity_provider()).await;
    let mut demo = project("demo", "http://127.0.0.1:9", Some(&identity));
    demo.password = Some("wrong".to_string());
    let h = Harness::new(vec![demo]);

    let response = h.send(get_req("/select_project/demo", None)).await;
    assert!(response.status().is_redirection());
    assert!(location(&response).starts_with("/?error="));
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_select_unknown_project() {
    let h = Harness::new(vec![]);
    let response = h.send(get_req("/select_project/ghost", None)).await;
    assert!(response.status().is_redirection());
    assert!(location(&response).starts_with("/?error="));
}

#[tokio::test]
async fn test_s3_listing() {
    let h = Harness::new(vec![]);
    seed(&h.storage).await;
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h.send(get_req("/api/s3/list", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing["folders"], json!(["reports/"]));
    assert_eq!(listing["files"][0]["key"], "notes.txt");

    let response = h
        .send(get_req("/api/s3/list?prefix=reports/", Some(&cookie)))
        .await;
    let listing = body_json(response).await;
    assert_eq!(listing["files"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_s3_folder_operations() {
    let h = Harness::new(vec![]);
    seed(&h.storage).await;
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h
        .send(post_json(
            "/api/s3/rename-folder",
            &cookie,
            json!({"old_prefix": "reports", "new_prefix": "reports/"}),
        ))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"message": "Source and destination are the same."})
    );

    let response = h
        .send(post_json(
            "/api/s3/copy-folder",
            &cookie,
            json!({"source_folder": "reports", "destination_folder": "backup"}),
        ))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"message": "Successfully copied folder reports/ to backup/"})
    );
    assert_eq!(h.storage.get("backup/b.csv").await.unwrap(), Bytes::from("4\n"));

    let response = h
        .send(post_json(
            "/api/s3/delete-folder",
            &cookie,
            json!({"prefix": "backup"}),
        ))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"message": "Successfully deleted folder backup/"})
    );

    let response = h
        .send(post_json(
            "/api/s3/delete-folder",
            &cookie,
            json!({"prefix": "backup"}),
        ))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"message": "Folder is already empty or does not exist."})
    );
}

#[tokio::test]
async fn test_s3_missing_fields() {
    let h = Harness::new(vec![]);
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h
        .send(post_json("/api/s3/rename", &cookie, json!({"old_key": "a"})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Missing"));

    let response = h
        .send(post_json("/api/s3/delete-folder", &cookie, json!({"prefix": ""})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_s3_view() {
    let h = Harness::new(vec![]);
    seed(&h.storage).await;
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h
        .send(get_req("/api/s3/view/reports/a.csv", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(body_text(response).await, "1,2,3\n");

    let response = h
        .send(get_req("/api/s3/view/reports/zzz.csv", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "File not found"}));
}

#[tokio::test]
async fn test_bucket_size_is_cached_until_invalidated() {
    let h = Harness::new(vec![]);
    seed(&h.storage).await;
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h.send(get_req("/api/s3/bucket-size", Some(&cookie))).await;
    assert_eq!(
        body_json(response).await,
        json!({"total_size": 13, "total_objects": 3})
    );

    // Written behind the dashboard's back, so the cached totals stay
    h.storage
        .put("extra.bin", Bytes::from_static(b"12345"))
        .await
        .unwrap();
    let response = h.send(get_req("/api/s3/bucket-size", Some(&cookie))).await;
    assert_eq!(body_json(response).await["total_objects"], 3);

    let response = h
        .send(post_json("/api/s3/bucket-size/invalidate", &cookie, json!({})))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"message": "Bucket size cache cleared."})
    );

    let response = h.send(get_req("/api/s3/bucket-size", Some(&cookie))).await;
    assert_eq!(
        body_json(response).await,
        json!({"total_size": 18, "total_objects": 4})
    );
}

#[tokio::test]
async fn test_deleting_a_file_clears_bucket_size() {
    let h = Harness::new(vec![]);
    seed(&h.storage).await;
    let cookie = h.login(project("demo", "http://127.0.0.1:9", None));

    let response = h.send(get_req("/api/s3/bucket-size", Some(&cookie))).await;
    assert_eq!(body_json(response).await["total_objects"], 3);

    let response = h
        .send(post_json("/api/s3/delete", &cookie, json!({"key": "notes.txt"})))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"message": "Successfully deleted notes.txt"})
    );

    let response = h.send(get_req("/api/s3/bucket-size", Some(&cookie))).await;
    assert_eq!(
        body_json(response).await,
        json!({"total_size": 8, "total_objects": 2})
    );
}
