//! Signed S3 requests for keys `object_store` cannot address.
//!
//! `object_store::path::Path` drops a trailing `/`, so a folder's own
//! placeholder object (`reports/`) would be read back as `reports`, a
//! different key. Those keys go through here instead.

use std::fmt;
use std::sync::Arc;

use object_store::aws::{AwsAuthorizer, AwsCredential};
use reqwest::{Client, Method, Request};
use url::Url;

use super::error::{Result, StorageError};
use crate::api::data::DataSession;

const SERVICE: &str = "s3";
const COPY_SOURCE: &str = "x-amz-copy-source";

#[derive(Clone)]
pub(crate) struct RawKeys {
    client: Client,
    credential: Arc<AwsCredential>,
    region: String,
    bucket: String,
    /// Path-style bucket URL, matching what `AmazonS3Builder` targets
    bucket_endpoint: Url,
}

impl fmt::Debug for RawKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawKeys")
            .field("bucket_endpoint", &self.bucket_endpoint.as_str())
            .field("region", &self.region)
            .finish()
    }
}

fn backend(message: impl ToString) -> StorageError {
    StorageError::Backend {
        code: "S3",
        message: message.to_string(),
    }
}

impl RawKeys {
    pub(crate) fn new(
        session: &DataSession,
        region: &str,
        bucket: &str,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        let bucket_endpoint = match endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            None => format!("https://s3.{}.amazonaws.com/{}", region, bucket),
        };
        let bucket_endpoint = Url::parse(&bucket_endpoint).map_err(backend)?;

        Ok(Self {
            client: Client::builder().build().map_err(backend)?,
            credential: Arc::new(AwsCredential {
                key_id: session.access_key_id.clone(),
                secret_key: session.secret_access_key.clone(),
                token: Some(session.session_token.clone()),
            }),
            region: region.to_string(),
            bucket: bucket.to_string(),
            bucket_endpoint,
        })
    }

    /// Object URL for `key`, keeping a trailing `/`.
    fn object_url(&self, key: &str) -> Result<Url> {
        let mut url = self.bucket_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| backend(format!("cannot address '{}'", key)))?
            .extend(key.split('/'));
        Ok(url)
    }

    /// `<bucket>/<encoded key>`, the form `x-amz-copy-source` expects.
    fn copy_source(&self, key: &str) -> Result<String> {
        let url = self.object_url(key)?;
        let encoded = url
            .path()
            .strip_prefix(self.bucket_endpoint.path())
            .unwrap_or(url.path());
        Ok(format!("{}{}", self.bucket, encoded))
    }

    async fn send(&self, mut request: Request) -> Result<()> {
        AwsAuthorizer::new(&self.credential, SERVICE, &self.region).authorize(&mut request, None);

        let method = request.method().clone();
        let url = request.url().clone();
        let response = self.client.execute(request).await.map_err(backend)?;
        let status = response.status();
        tracing::debug!(%method, %url, %status, "raw key request");

        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(backend(format!("{} {} returned {}: {}", method, url, status, body)))
    }

    pub(crate) async fn delete(&self, key: &str) -> Result<()> {
        let request = Request::new(Method::DELETE, self.object_url(key)?);
        self.send(request).await
    }

    pub(crate) async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        let source = self.copy_source(src)?;
        let mut request = Request::new(Method::PUT, self.object_url(dst)?);
        request.headers_mut().insert(
            COPY_SOURCE,
            source
                .parse()
                .map_err(|_| StorageError::invalid_key(src, "not a valid header value"))?,
        );
        self.send(request).await
    }
}
