use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;
use uuid::Uuid;

use common::prelude::{
    ApiClient, ApiError, BucketStatsCache, ConfigError, ConfigStore, ProjectConfig, Storage,
    StorageError,
};

/// Distinct projects whose bucket stats are kept at once.
const STATS_CAPACITY: u64 = 64;
/// Logged-in browser sessions kept at once.
const SESSION_CAPACITY: u64 = 256;
/// A session outlives its identity token; API calls fail once that expires.
const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A project the browser has logged into.
#[derive(Clone)]
pub struct DashboardSession {
    pub project: ProjectConfig,
    pub token: String,
    pub username: String,
}

impl DashboardSession {
    pub fn new(project: ProjectConfig, token: String) -> Self {
        let username = project.username.clone();
        Self {
            project,
            token,
            username,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project.name
    }

    pub fn api_client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&self.project, Some(&self.token))
    }
}

impl fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardSession")
            .field("project", &self.project.name)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Where dashboard handlers get a bucket client for a session.
#[async_trait]
pub trait StorageProvider: Send + Sync + fmt::Debug {
    async fn storage(&self, session: &DashboardSession) -> Result<Storage, StorageError>;
}

/// Fetches fresh temporary credentials from the EPIC API on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionStorage;

#[async_trait]
impl StorageProvider for SessionStorage {
    async fn storage(&self, session: &DashboardSession) -> Result<Storage, StorageError> {
        let client = session.api_client()?;
        Storage::for_session(&client, &session.project).await
    }
}

/// Session id to session, bounded in count and age.
#[derive(Clone)]
struct Sessions {
    inner: Cache<Uuid, DashboardSession>,
}

impl Sessions {
    fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl fmt::Debug for Sessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sessions")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[derive(Debug)]
struct Inner {
    config: ConfigStore,
    sessions: Sessions,
    stats: BucketStatsCache,
    storage: Arc<dyn StorageProvider>,
}

/// Cheap to clone; every clone shares the same sessions and cache.
#[derive(Debug, Clone)]
pub struct UiState {
    inner: Arc<Inner>,
}

impl UiState {
    pub fn new(config: ConfigStore, stats_ttl: Duration) -> Self {
        Self::with_storage(config, stats_ttl, Arc::new(SessionStorage))
    }

    pub fn with_storage(
        config: ConfigStore,
        stats_ttl: Duration,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                sessions: Sessions::new(SESSION_CAPACITY, SESSION_TTL),
                stats: BucketStatsCache::new(STATS_CAPACITY, stats_ttl),
                storage,
            }),
        }
    }

    /// Open the config store at `config_path` (or ~/.epic).
    pub fn from_config(config: &crate::DashboardConfig) -> Result<Self, StateError> {
        let store = ConfigStore::open(config.config_path.clone())?;
        Ok(Self::new(store, config.stats_ttl))
    }

    pub fn config(&self) -> &ConfigStore {
        &self.inner.config
    }

    pub fn stats(&self) -> &BucketStatsCache {
        &self.inner.stats
    }

    /// Configured project names, sorted.
    pub fn project_names(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.inner.config.load()?.into_keys().collect())
    }

    pub fn login(&self, session: DashboardSession) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.sessions.inner.insert(id, session);
        id
    }

    /// `None` once the session is logged out, expired or evicted.
    pub fn session(&self, id: &Uuid) -> Option<DashboardSession> {
        self.inner.sessions.inner.get(id)
    }

    pub fn logout(&self, id: &Uuid) -> Option<DashboardSession> {
        self.inner.sessions.inner.remove(id)
    }

    pub async fn storage(&self, session: &DashboardSession) -> Result<Storage, StorageError> {
        self.inner.storage.storage(session).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;

    /// Hands every session the same bucket.
    #[derive(Debug, Clone)]
    pub struct FixedStorage(pub Storage);

    #[async_trait]
    impl StorageProvider for FixedStorage {
        async fn storage(&self, _session: &DashboardSession) -> Result<Storage, StorageError> {
            Ok(self.0.clone())
        }
    }

    pub fn project(name: &str, api_url: &str) -> ProjectConfig {
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
            identity_endpoint: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sessions_are_isolated() {
        let dir = TempDir::new().unwrap();
        let state = UiState::new(ConfigStore::at(dir.path().join("config")), Duration::from_secs(60));

        let a = state.login(DashboardSession::new(project("a", "http://a"), "ta".into()));
        let b = state.login(DashboardSession::new(project("b", "http://b"), "tb".into()));

        assert_eq!(state.session(&a).unwrap().project_name(), "a");
        assert_eq!(state.session(&b).unwrap().token, "tb");

        state.logout(&a);
        assert!(state.session(&a).is_none());
        assert!(state.session(&b).is_some());
    }

    #[test]
    fn test_sessions_are_bounded() {
        let sessions = Sessions::new(4, Duration::from_secs(60));
        for i in 0..32 {
            let session = DashboardSession::new(project("a", "http://a"), format!("t{}", i));
            sessions.inner.insert(Uuid::new_v4(), session);
        }
        sessions.inner.run_pending_tasks();
        assert!(sessions.inner.entry_count() <= 4);
    }

    #[test]
    fn test_sessions_expire() {
        let sessions = Sessions::new(4, Duration::from_millis(50));
        let id = Uuid::new_v4();
        sessions
            .inner
            .insert(id, DashboardSession::new(project("a", "http://a"), "ta".into()));
        assert!(sessions.inner.get(&id).is_some());

        std::thread::sleep(Duration::from_millis(120));
        assert!(sessions.inner.get(&id).is_none());
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = DashboardSession::new(project("a", "http://a"), "secret-token".into());
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn test_project_names() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::at(dir.path().join("config"));
        store.upsert(project("zeta", "http://z")).unwrap();
        store.upsert(project("alpha", "http://a")).unwrap();

        let state = UiState::new(store, Duration::from_secs(60));
        assert_eq!(state.project_names().unwrap(), vec!["alpha", "zeta"]);
    }
}
