use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ConfigError, ProjectConfig, Projects};

pub const CONFIG_DIR_NAME: &str = ".epic";
pub const CONFIG_FILE_NAME: &str = "config";

/// JSON file mapping project name to [`ProjectConfig`].
///
/// Writes are a plain overwrite; a crash mid-write can leave a truncated
/// file behind.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Get the config directory path (custom or default ~/.epic)
    pub fn config_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    pub fn open(custom_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let dir = Self::config_dir(custom_path)?;
        Ok(Self::at(dir.join(CONFIG_FILE_NAME)))
    }

    /// Use an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every project. A missing file is an empty mapping.
    pub fn load(&self) -> Result<Projects, ConfigError> {
        if !self.path.exists() {
            return Ok(Projects::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut projects: Projects = serde_json::from_str(&raw)?;
        for (name, project) in projects.iter_mut() {
            project.name = name.clone();
        }

        Ok(projects)
    }

    pub fn save(&self, projects: &Projects) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        projects.serialize(&mut serializer)?;
        fs::write(&self.path, buf)?;

        tracing::debug!(path = %self.path.display(), projects = projects.len(), "saved config");
        Ok(())
    }

    pub fn project(&self, name: &str) -> Result<ProjectConfig, ConfigError> {
        self.load()?
            .remove(name)
            .ok_or_else(|| ConfigError::ProjectNotFound(name.to_string()))
    }

    /// Insert or fully replace a project entry.
    pub fn upsert(&self, project: ProjectConfig) -> Result<(), ConfigError> {
        let mut projects = self.load()?;
        projects.insert(project.name.clone(), project);
        self.save(&projects)
    }

    pub fn remove(&self, name: &str) -> Result<ProjectConfig, ConfigError> {
        let mut projects = self.load()?;
        let removed = projects
            .remove(name)
            .ok_or_else(|| ConfigError::ProjectNotFound(name.to_string()))?;
        self.save(&projects)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;

    fn sample_project(name: &str) -> ProjectConfig {
        ProjectConfig {
            name: name.to_string(),
            api_base_url: "https://abc.execute-api.eu-west-2.amazonaws.com/prod".to_string(),
            identity_pool_client_id: "client".to_string(),
            identity_pool_id: Some("pool".to_string()),
            storage_bucket_name: Some("bucket".to_string()),
            job_queue_name: Some("queue".to_string()),
            region: "eu-west-2".to_string(),
            username: "alice".to_string(),
            password: None,
            identity_endpoint: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().join("nested"))).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().join("nested"))).unwrap();
        store.upsert(sample_project("alpha")).unwrap();

        assert!(store.path().exists());
        let loaded = store.project("alpha").unwrap();
        assert_eq!(loaded.name, "alpha");
        assert_eq!(loaded.username, "alice");
    }

    #[test]
    fn test_project_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().to_path_buf())).unwrap();
        store.upsert(sample_project("alpha")).unwrap();

        match store.project("beta") {
            Err(ConfigError::ProjectNotFound(name)) => assert_eq!(name, "beta"),
            other => panic!("expected ProjectNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().to_path_buf())).unwrap();
        let raw = r#"{
            "alpha": {
                "epic_api_url": "https://abc.execute-api.eu-west-2.amazonaws.com/prod",
                "user_pool_client_id": "client",
                "user_pool_id": "pool",
                "data_bucket_name": "bucket",
                "batch_job_queue_name": "queue",
                "region": "eu-west-2",
                "username": "alice",
                "password": "pw",
                "theme": {"dark": true}
            },
            "beta": {
                "epic_api_url": "https://def.execute-api.us-east-1.amazonaws.com/prod",
                "user_pool_client_id": "client-b",
                "region": "us-east-1",
                "username": "bob"
            }
        }"#;
        fs::write(store.path(), raw).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        let before: serde_json::Value = serde_json::from_str(raw).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(before, after);
        assert_eq!(store.load().unwrap(), loaded);
    }

    #[test]
    fn test_null_optional_keys_are_dropped_on_save() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().to_path_buf())).unwrap();
        fs::write(
            store.path(),
            r#"{"gamma": {
                "epic_api_url": "https://ghi.execute-api.eu-west-2.amazonaws.com/prod",
                "user_pool_client_id": "client-g",
                "user_pool_id": null,
                "password": null,
                "region": "eu-west-2",
                "username": "carol"
            }}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded["gamma"].identity_pool_id, None);
        store.save(&loaded).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let gamma = saved["gamma"].as_object().unwrap();
        for key in ["user_pool_id", "data_bucket_name", "batch_job_queue_name", "password"] {
            assert!(!gamma.contains_key(key), "{} written back", key);
        }
        assert_eq!(store.load().unwrap(), loaded);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().to_path_buf())).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(Some(dir.path().to_path_buf())).unwrap();
        store.upsert(sample_project("alpha")).unwrap();
        store.upsert(sample_project("beta")).unwrap();

        let removed = store.remove("alpha").unwrap();
        assert_eq!(removed.name, "alpha");
        let remaining: Vec<_> = store.load().unwrap().into_keys().collect();
        assert_eq!(remaining, vec!["beta".to_string()]);
        assert!(store.remove("alpha").is_err());
    }
}
