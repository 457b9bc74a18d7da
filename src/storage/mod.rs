//! Evidence photo storage.
//!
//! Photos are compressed server-side ([`compress`]) and written to one of
//! two logical buckets, then addressed by a generated unique reference.
//! Only references are persisted on workflow records, never binary data.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::workflow::WorkflowError;

pub mod compress;

pub use compress::{compress_photo, MAX_PHOTO_BYTES, TARGET_PHOTO_BYTES};

/// The two evidence buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoCategory {
    KeyArea,
    Damage,
}

impl PhotoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyArea => "key-area",
            Self::Damage => "damage",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "key-area" => Ok(Self::KeyArea),
            "damage" => Ok(Self::Damage),
            other => Err(WorkflowError::Validation(format!(
                "unknown photo category '{other}'"
            ))),
        }
    }
}

/// Write-side interface to the photo store.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Stores already-compressed JPEG bytes and returns the reference to
    /// persist on the workflow record.
    async fn put(
        &self,
        category: PhotoCategory,
        tenancy_id: Uuid,
        bytes: &[u8],
    ) -> Result<String, WorkflowError>;
}

/// Filesystem-backed store. References use the `local://` scheme so they
/// survive the URL-shape validation applied to intention submissions.
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: PathBuf,
}

impl LocalPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_name() -> String {
        let mut rng = rand::thread_rng();
        let suffix: u64 = rng.r#gen();
        format!("{}-{:016x}.jpg", Utc::now().timestamp_millis(), suffix)
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn put(
        &self,
        category: PhotoCategory,
        tenancy_id: Uuid,
        bytes: &[u8],
    ) -> Result<String, WorkflowError> {
        let name = Self::object_name();
        let dir = self
            .root
            .join(category.as_str())
            .join(tenancy_id.to_string());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| WorkflowError::Upload(format!("storage directory: {err}")))?;
        tokio::fs::write(dir.join(&name), bytes)
            .await
            .map_err(|err| WorkflowError::Upload(format!("storage write: {err}")))?;

        Ok(format!(
            "local:///{}/{}/{}",
            category.as_str(),
            tenancy_id,
            name
        ))
    }
}

/// Shared handle used by the photo upload handler.
pub type DynPhotoStore = Arc<dyn PhotoStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn category_round_trips() {
        for category in [PhotoCategory::KeyArea, PhotoCategory::Damage] {
            assert_eq!(PhotoCategory::parse(category.as_str()).unwrap(), category);
        }
        assert!(PhotoCategory::parse("selfies").is_err());
    }

    #[tokio::test]
    async fn put_writes_a_file_and_returns_a_parseable_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPhotoStore::new(dir.path());
        let tenancy_id = Uuid::new_v4();

        let reference = store
            .put(PhotoCategory::Damage, tenancy_id, b"jpegbytes")
            .await
            .unwrap();

        let url = Url::parse(&reference).unwrap();
        assert_eq!(url.scheme(), "local");
        let expected_dir = dir.path().join("damage").join(tenancy_id.to_string());
        let entries: Vec<_> = std::fs::read_dir(&expected_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
