//! Fixtures for op tests: a temp config dir and mocked EPIC services.

use std::collections::BTreeMap;

use axum::Router;
use common::prelude::{ConfigStore, ProjectConfig, SessionEnv};
use tempfile::TempDir;
use url::Url;

use super::op::OpContext;

pub const PROJECT: &str = "demo";

pub fn project(api_url: &str) -> ProjectConfig {
    ProjectConfig {
        name: PROJECT.to_string(),
        api_base_url: api_url.to_string(),
        identity_pool_client_id: "client-id".to_string(),
        identity_pool_id: Some("eu-west-2_pool".to_string()),
        storage_bucket_name: Some("demo-data".to_string()),
        job_queue_name: Some("demo-queue".to_string()),
        region: "eu-west-2".to_string(),
        username: "alice".to_string(),
        password: Some("hunter2".to_string()),
        identity_endpoint: None,
        extra: BTreeMap::new(),
    }
}

/// Context whose config holds one project, `demo`, which is also active.
pub fn context(api_url: &str, token: Option<&str>) -> (OpContext, TempDir) {
    context_with(project(api_url), token)
}

pub fn context_with(project: ProjectConfig, token: Option<&str>) -> (OpContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::open(Some(dir.path().to_path_buf())).unwrap();
    store.upsert(project).unwrap();

    let env = SessionEnv {
        token: token.map(str::to_string),
        active_project: Some(PROJECT.to_string()),
    };
    (OpContext::new(Some(dir.path().to_path_buf()), env), dir)
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn identity_endpoint(base: &str) -> Url {
    Url::parse(&format!("{}/", base)).unwrap()
}
