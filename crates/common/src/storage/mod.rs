//! Object storage client for a project's data bucket.
//!
//! Credentials are short-lived and come from the API's data-session
//! endpoint. Keys are slash-delimited; a "folder" is any key prefix ending
//! in `/`.

mod error;
mod raw;
mod stats;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::{ListResult, ObjectStore};
use serde::Serialize;

use crate::api::data::{DataSession, GetDataSessionRequest};
use crate::api::ApiClient;
use crate::config::ProjectConfig;

use raw::RawKeys;

pub use error::{Result, StorageError};
pub use stats::{BucketStats, BucketStatsCache, DEFAULT_STATS_TTL};

/// Largest number of keys removed per batch delete request.
pub const DELETE_BATCH_LIMIT: usize = 1000;
pub const DEFAULT_PRESIGN_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignMethod {
    Get,
    Put,
}

impl PresignMethod {
    fn http_method(self) -> http::Method {
        match self {
            Self::Get => http::Method::GET,
            Self::Put => http::Method::PUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderOutcome {
    /// Source and destination are the same folder; nothing was touched
    Unchanged,
    /// The folder held no objects
    Empty,
    Completed { objects: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// One level of a delimiter listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub files: Vec<ObjectEntry>,
    /// Sub-folder prefixes, each ending in `/`
    pub folders: Vec<String>,
}

impl Listing {
    fn from_result(prefix: &str, result: ListResult) -> Self {
        let placeholder = prefix.trim_end_matches('/');
        let files = result
            .objects
            .into_iter()
            .filter(|meta| meta.location.as_ref() != placeholder)
            .map(|meta| ObjectEntry {
                key: meta.location.to_string(),
                size: meta.size as u64,
                last_modified: meta.last_modified,
            })
            .collect();
        let folders = result
            .common_prefixes
            .into_iter()
            .map(|p| format!("{}/", p))
            .collect();
        Self { files, folders }
    }
}

/// Normalize a folder prefix so it ends in exactly one `/`.
pub fn folder_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}

/// Normalize both sides of a folder copy or move. `None` means the two
/// prefixes name the same folder.
pub fn folder_move(src: &str, dst: &str) -> Result<Option<(String, String)>> {
    if src.trim_matches('/').is_empty() {
        return Err(StorageError::invalid_key(src, "folder prefix is empty"));
    }
    if dst.trim_matches('/').is_empty() {
        return Err(StorageError::invalid_key(dst, "folder prefix is empty"));
    }
    let (src, dst) = (folder_prefix(src), folder_prefix(dst));
    if src == dst {
        return Ok(None);
    }
    Ok(Some((src, dst)))
}

/// Split keys into delete batches the backend accepts.
pub fn delete_batches(keys: Vec<ObjectPath>) -> Vec<Vec<ObjectPath>> {
    keys.chunks(DELETE_BATCH_LIMIT)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Map `location` under folder `src` to the same relative path under `dst`.
/// The folder's own placeholder maps to nothing.
fn relocate(location: &ObjectPath, src: &str, dst: &str) -> Option<String> {
    location
        .as_ref()
        .strip_prefix(src)
        .filter(|relative| !relative.is_empty())
        .map(|relative| format!("{}{}", dst, relative))
}

fn parse_key(key: &str) -> Result<ObjectPath> {
    if key.trim_matches('/').is_empty() {
        return Err(StorageError::invalid_key(key, "key is empty"));
    }
    ObjectPath::parse(key).map_err(|e| StorageError::invalid_key(key, e))
}

/// Objects below a folder, recursively. The folder's `prefix/`
/// placeholder is kept apart since it has no [`ObjectPath`] of its own.
#[derive(Debug, Default)]
struct FolderContents {
    objects: Vec<ObjectPath>,
    placeholder: bool,
}

impl FolderContents {
    fn len(&self) -> usize {
        self.objects.len() + usize::from(self.placeholder)
    }
}

/// Client for one bucket.
#[derive(Debug, Clone)]
pub struct Storage {
    inner: Arc<dyn ObjectStore>,
    signer: Option<Arc<dyn Signer>>,
    raw: Option<RawKeys>,
    bucket: String,
}

impl Storage {
    /// Build an S3 client from temporary session credentials.
    pub fn connect(session: &DataSession, region: &str, bucket: &str) -> Result<Self> {
        Self::connect_to(session, region, bucket, None)
    }

    /// Like [`Storage::connect`], against an S3-compatible `endpoint`
    /// (path-style, plain http allowed) when one is given.
    pub fn connect_to(
        session: &DataSession,
        region: &str,
        bucket: &str,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_access_key_id(&session.access_key_id)
            .with_secret_access_key(&session.secret_access_key)
            .with_token(&session.session_token)
            .with_region(region)
            .with_bucket_name(bucket);
        if let Some(endpoint) = endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }
        let store = Arc::new(builder.build()?);

        Ok(Self {
            inner: store.clone(),
            signer: Some(store),
            raw: Some(RawKeys::new(session, region, bucket, endpoint)?),
            bucket: bucket.to_string(),
        })
    }

    /// Fetch fresh credentials for the project and connect to its bucket.
    pub async fn for_session(api: &ApiClient, project: &ProjectConfig) -> Result<Self> {
        let session = api.call(&GetDataSessionRequest).await?;

        let bucket = session
            .bucket()
            .map(str::to_string)
            .or_else(|| project.storage_bucket_name.clone())
            .ok_or(StorageError::MissingBucket)?;
        let region = session.region.as_deref().unwrap_or(&project.region);

        tracing::debug!(%bucket, %region, "connecting to project bucket");
        Self::connect(&session, region, &bucket)
    }

    /// An in-memory bucket. Presigning is unavailable.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
            signer: None,
            raw: None,
            bucket: "memory".to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// List one level below `prefix`.
    pub async fn list(&self, prefix: &str) -> Result<Listing> {
        let path = if prefix.trim_matches('/').is_empty() {
            None
        } else {
            Some(ObjectPath::parse(prefix).map_err(|e| StorageError::invalid_key(prefix, e))?)
        };
        let result = self.inner.list_with_delimiter(path.as_ref()).await?;
        Ok(Listing::from_result(prefix, result))
    }

    pub async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = parse_key(key)?;
        self.inner.put(&path, data.into()).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Bytes> {
        let path = parse_key(key)?;
        let result = self.inner.get(&path).await?;
        Ok(result.bytes().await?)
    }

    pub async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        let (from, to) = (parse_key(src)?, parse_key(dst)?);
        self.inner.copy(&from, &to).await?;
        Ok(())
    }

    /// Copy then delete. A failed delete leaves both copies in place.
    pub async fn rename(&self, old: &str, new: &str) -> Result<()> {
        self.copy(old, new).await?;
        let path = parse_key(old)?;
        self.inner
            .delete(&path)
            .await
            .map_err(|e| StorageError::PartialFailure {
                message: e.to_string(),
            })
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let path = parse_key(key)?;
        self.inner.delete(&path).await?;
        Ok(())
    }

    /// Every object below `folder` (which ends in `/`), recursively.
    async fn folder_contents(&self, folder: &str) -> Result<FolderContents> {
        let prefix = ObjectPath::parse(folder).map_err(|e| StorageError::invalid_key(folder, e))?;
        let locations: Vec<ObjectPath> = self
            .inner
            .list(Some(&prefix))
            .map_ok(|meta| meta.location)
            .try_collect()
            .await?;

        // Listing asks for `folder`, so the only hit equal to the bare
        // prefix is the `folder` placeholder itself.
        let mut contents = FolderContents::default();
        for location in locations {
            if location == prefix {
                contents.placeholder = true;
            } else {
                contents.objects.push(location);
            }
        }
        Ok(contents)
    }

    fn raw_keys(&self, key: &str) -> Result<&RawKeys> {
        self.raw.as_ref().ok_or_else(|| StorageError::Backend {
            code: "NotSupported",
            message: format!("cannot address folder placeholder '{}'", key),
        })
    }

    async fn copy_contents(&self, src: &str, dst: &str) -> Result<FolderContents> {
        let contents = self.folder_contents(src).await?;
        for location in &contents.objects {
            let Some(target) = relocate(location, src, dst) else {
                continue;
            };
            let target = parse_key(&target)?;
            self.inner.copy(location, &target).await?;
        }
        if contents.placeholder {
            self.raw_keys(src)?.copy(src, dst).await?;
        }
        Ok(contents)
    }

    async fn delete_all(&self, folder: &str, contents: FolderContents) -> Result<()> {
        for batch in delete_batches(contents.objects) {
            tracing::debug!(keys = batch.len(), "deleting batch");
            let locations = stream::iter(batch.into_iter().map(Ok)).boxed();
            self.inner
                .delete_stream(locations)
                .try_collect::<Vec<_>>()
                .await?;
        }
        if contents.placeholder {
            self.raw_keys(folder)?.delete(folder).await?;
        }
        Ok(())
    }

    /// Copy every object under `src` to the same relative path under `dst`.
    /// Not atomic.
    pub async fn copy_folder(&self, src: &str, dst: &str) -> Result<FolderOutcome> {
        let Some((src, dst)) = folder_move(src, dst)? else {
            return Ok(FolderOutcome::Unchanged);
        };
        let copied = self.copy_contents(&src, &dst).await?;
        Ok(match copied.len() {
            0 => FolderOutcome::Empty,
            objects => FolderOutcome::Completed { objects },
        })
    }

    /// Copy every object under `old` to `new`, then delete the originals.
    pub async fn rename_folder(&self, old: &str, new: &str) -> Result<FolderOutcome> {
        let Some((old, new)) = folder_move(old, new)? else {
            return Ok(FolderOutcome::Unchanged);
        };
        let copied = self.copy_contents(&old, &new).await?;
        let objects = copied.len();
        if objects == 0 {
            return Ok(FolderOutcome::Empty);
        }

        self.delete_all(&old, copied)
            .await
            .map_err(|e| StorageError::PartialFailure {
                message: e.to_string(),
            })?;
        Ok(FolderOutcome::Completed { objects })
    }

    pub async fn delete_folder(&self, prefix: &str) -> Result<FolderOutcome> {
        if prefix.trim_matches('/').is_empty() {
            return Err(StorageError::invalid_key(prefix, "folder prefix is empty"));
        }
        let folder = folder_prefix(prefix);
        let contents = self.folder_contents(&folder).await?;
        let objects = contents.len();
        if objects == 0 {
            return Ok(FolderOutcome::Empty);
        }
        self.delete_all(&folder, contents).await?;
        Ok(FolderOutcome::Completed { objects })
    }

    /// A time-limited URL for downloading (`Get`) or uploading (`Put`) one key.
    pub async fn presign(&self, key: &str, method: PresignMethod, ttl: Duration) -> Result<String> {
        let signer = self.signer.as_ref().ok_or(StorageError::PresignUnsupported)?;
        let path = parse_key(key)?;
        let url = signer.signed_url(method.http_method(), &path, ttl).await?;
        Ok(url.to_string())
    }

    /// Total size and object count across the whole bucket.
    pub async fn bucket_size(&self) -> Result<BucketStats> {
        let stats = self
            .inner
            .list(None)
            .try_fold(BucketStats::default(), |mut stats, meta| async move {
                stats.total_size += meta.size as u64;
                stats.total_objects += 1;
                Ok(stats)
            })
            .await?;
        Ok(stats)
    }
}
