//! Media storage collaborator.
//!
//! The real service is external; handlers consume it behind [`MediaStore`].
//! Failures are a proper `Err`, never an error object posing as a result.

use std::collections::HashSet;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use uuid::Uuid;

use quill_domain::MediaAsset;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("media service unavailable: {0}")]
    Unavailable(String),
}

/// Credentials for the cloud media service.
///
/// Built once at process start from the environment and passed into the
/// store's constructor; no ambient globals.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        Self {
            cloud_name: std::env::var("MEDIA_CLOUD_NAME").unwrap_or_default(),
            api_key: std::env::var("MEDIA_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("MEDIA_API_SECRET").unwrap_or_default(),
        }
    }
}

/// Upload/remove contract for stored images.
pub trait MediaStore: Send + Sync {
    fn upload(&self, filename: &str, bytes: &[u8]) -> Result<MediaAsset, MediaError>;

    /// Remove one asset. Removing an unknown id is not an error (matches the
    /// provider's destroy semantics).
    fn delete(&self, public_id: &str) -> Result<(), MediaError>;

    fn delete_many(&self, public_ids: &[String]) -> Result<(), MediaError>;
}

/// In-memory media store for dev and tests.
///
/// Tracks which public ids are currently stored so tests can assert cascade
/// cleanup, and can be flipped unavailable to exercise failure paths.
#[derive(Debug)]
pub struct InMemoryMediaStore {
    assets: RwLock<HashSet<String>>,
    available: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new(_config: MediaConfig) -> Self {
        Self {
            assets: RwLock::new(HashSet::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn contains(&self, public_id: &str) -> bool {
        self.assets
            .read()
            .map(|a| a.contains(public_id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> Result<(), MediaError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(MediaError::Unavailable("media store offline".into()))
        }
    }
}

impl MediaStore for InMemoryMediaStore {
    fn upload(&self, filename: &str, _bytes: &[u8]) -> Result<MediaAsset, MediaError> {
        self.ensure_available()?;

        let public_id = Uuid::now_v7().to_string();
        let url = format!("https://media.quill.local/{public_id}/{filename}");

        self.assets
            .write()
            .map_err(|_| MediaError::Unavailable("media store lock poisoned".into()))?
            .insert(public_id.clone());

        Ok(MediaAsset::new(url, public_id))
    }

    fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.ensure_available()?;

        self.assets
            .write()
            .map_err(|_| MediaError::Unavailable("media store lock poisoned".into()))?
            .remove(public_id);
        Ok(())
    }

    fn delete_many(&self, public_ids: &[String]) -> Result<(), MediaError> {
        for id in public_ids {
            self.delete(id)?;
        }
        Ok(())
    }
}
