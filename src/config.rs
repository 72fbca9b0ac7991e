//! Client configuration shared by every handle.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::client::{DocumentService, ObjectStorage, ServiceError};
use crate::error::{Error, Result};

/// Environment variable naming the service-account credentials file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_DOC_CREDENTIALS";

/// Environment variable overriding the image bucket.
pub const BUCKET_ENV: &str = "OODLES_BUCKET";

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "gs://data-studies/img";

/// Validity of signed image URLs handed to the slides API.
pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(10 * 60);

/// Clients and identity used by every component.
///
/// Built once and shared as `Arc<Config>`.
#[derive(Clone)]
pub struct Config {
    service: Arc<dyn DocumentService>,
    storage: Option<Arc<dyn ObjectStorage>>,

    /// Service-identity email documents must be shared with
    pub service_email: String,

    /// Where uploaded images are stored
    pub bucket: BucketPath,

    /// Validity of signed image URLs
    pub signed_url_ttl: Duration,
}

impl Config {
    /// Create a configuration around a document-service client.
    pub fn new(service: Arc<dyn DocumentService>, service_email: impl Into<String>) -> Self {
        Self {
            service,
            storage: None,
            service_email: service_email.into(),
            bucket: BucketPath::default(),
            signed_url_ttl: DEFAULT_SIGNED_URL_TTL,
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// Reads the service email from the credentials file named by
    /// `GOOGLE_DOC_CREDENTIALS` and the bucket from `OODLES_BUCKET`.
    pub fn from_env(
        service: Arc<dyn DocumentService>,
        storage: Option<Arc<dyn ObjectStorage>>,
    ) -> Result<Self> {
        let path = std::env::var(CREDENTIALS_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", CREDENTIALS_ENV)))?;
        let service_email = read_service_email(&path)?;

        let bucket = match std::env::var(BUCKET_ENV) {
            Ok(value) => BucketPath::parse(&value)?,
            Err(_) => BucketPath::default(),
        };

        let mut config = Self::new(service, service_email).with_bucket(bucket);
        config.storage = storage;
        Ok(config)
    }

    /// Set the object-storage client used for local image uploads.
    pub fn with_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the image bucket.
    pub fn with_bucket(mut self, bucket: BucketPath) -> Self {
        self.bucket = bucket;
        self
    }

    /// Set the signed URL validity.
    pub fn with_signed_url_ttl(mut self, ttl: Duration) -> Self {
        self.signed_url_ttl = ttl;
        self
    }

    /// Document-service client.
    pub fn service(&self) -> &dyn DocumentService {
        self.service.as_ref()
    }

    /// Object-storage client, if configured.
    pub fn storage(&self) -> Result<&dyn ObjectStorage> {
        self.storage
            .as_deref()
            .ok_or_else(|| Error::Config("no object storage client configured".into()))
    }

    /// Map a service failure with this configuration's identity.
    pub(crate) fn service_error(
        &self,
        err: ServiceError,
        operation: &str,
        document_id: &str,
    ) -> Error {
        Error::from_service(err, operation, document_id, &self.service_email)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("service_email", &self.service_email)
            .field("bucket", &self.bucket)
            .field("signed_url_ttl", &self.signed_url_ttl)
            .field("storage", &self.storage.is_some())
            .finish()
    }
}

#[derive(Deserialize)]
struct ServiceAccountKey {
    client_email: String,
}

/// Read the `client_email` of a service-account credentials file.
pub fn read_service_email<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let key: ServiceAccountKey = serde_json::from_str(&raw).map_err(|e| {
        Error::Config(format!(
            "{} is not a service-account key: {}",
            path.display(),
            e
        ))
    })?;
    Ok(key.client_email)
}

/// A bucket plus object prefix, written `gs://bucket/prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPath {
    /// Bucket name
    pub bucket: String,

    /// Object prefix without surrounding slashes (may be empty)
    pub prefix: String,
}

impl BucketPath {
    /// Parse `gs://bucket/prefix` (the scheme is optional).
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let rest = trimmed.strip_prefix("gs://").unwrap_or(trimmed);
        let (bucket, prefix) = match rest.split_once('/') {
            Some((bucket, prefix)) => (bucket, prefix.trim_matches('/')),
            None => (rest, ""),
        };
        if bucket.is_empty() {
            return Err(Error::Config(format!("invalid bucket path: {}", value)));
        }
        Ok(Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }

    /// Object name for a file placed under this prefix.
    pub fn object_for(&self, file_name: &str) -> String {
        if self.prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.prefix, file_name)
        }
    }
}

impl Default for BucketPath {
    fn default() -> Self {
        Self {
            bucket: "data-studies".to_string(),
            prefix: "img".to_string(),
        }
    }
}

impl fmt::Display for BucketPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "gs://{}", self.bucket)
        } else {
            write!(f, "gs://{}/{}", self.bucket, self.prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bucket_path_parse() {
        let path = BucketPath::parse("gs://data-studies/img").unwrap();
        assert_eq!(path, BucketPath::default());
        assert_eq!(path.to_string(), DEFAULT_BUCKET);
        assert_eq!(path.object_for("photo.png"), "img/photo.png");

        let bare = BucketPath::parse("assets").unwrap();
        assert_eq!(bare.prefix, "");
        assert_eq!(bare.object_for("a.png"), "a.png");

        let nested = BucketPath::parse("gs://b/x/y/").unwrap();
        assert_eq!(nested.object_for("a.png"), "x/y/a.png");
    }

    #[test]
    fn test_bucket_path_rejects_empty() {
        assert!(BucketPath::parse("gs://").is_err());
        assert!(BucketPath::parse("").is_err());
    }

    #[test]
    fn test_read_service_email() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type": "service_account", "client_email": "bot@proj.iam.gserviceaccount.com"}}"#
        )
        .unwrap();

        let email = read_service_email(file.path()).unwrap();
        assert_eq!(email, "bot@proj.iam.gserviceaccount.com");
    }

    #[test]
    fn test_read_service_email_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "service_account"}}"#).unwrap();

        let result = read_service_email(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_read_service_email_missing_file() {
        let result = read_service_email("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
