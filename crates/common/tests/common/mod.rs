//! Shared helpers for tests against mocked EPIC services
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use common::config::ProjectConfig;
use parking_lot::Mutex;
use url::Url;

/// `METHOD /path` for every request a mock server received, in order.
#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> (String, RequestLog) {
    let log = RequestLog::default();
    let recorder = log.clone();
    let router = router.layer(middleware::from_fn(move |req: Request, next: Next| {
        let recorder = recorder.clone();
        async move {
            recorder
                .0
                .lock()
                .push(format!("{} {}", req.method(), req.uri().path()));
            let response: Response = next.run(req).await;
            response
        }
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), log)
}

pub fn project(api_url: &str, identity_url: Option<&str>) -> ProjectConfig {
    ProjectConfig {
        name: "demo".to_string(),
        api_base_url: api_url.to_string(),
        identity_pool_client_id: "client-id".to_string(),
        identity_pool_id: Some("eu-west-2_pool".to_string()),
        storage_bucket_name: Some("epic-data".to_string()),
        job_queue_name: Some("queue".to_string()),
        region: "eu-west-2".to_string(),
        username: "alice".to_string(),
        password: Some("hunter2".to_string()),
        identity_endpoint: identity_url.map(|u| Url::parse(u).unwrap()),
        extra: BTreeMap::new(),
    }
}
