//! Local file system store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::storage::{PrivilegeStore, ResourceKind, StoredResource, check_version};
use crate::utils::error::{PrivilegeError, Result};

/// How long a save waits for another writer's lock file
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);
/// Lock files older than this are left over from a crashed writer
const STALE_LOCK_AGE: Duration = Duration::from_secs(30);
const LOCK_RETRY_MIN: Duration = Duration::from_millis(2);
const LOCK_RETRY_MAX: Duration = Duration::from_millis(50);

/// Store writing each resource to `<base>/<resource>.json`
///
/// Saves hold `<base>/<resource>.lock` across the version check and the rename, so
/// separate processes sharing the directory cannot both pass the same expected version.
#[derive(Debug)]
pub struct LocalFileStore {
    base_path: PathBuf,
    // Serializes writers within this process before they contend for the lock file
    write_lock: Mutex<()>,
}

/// Exclusive lock file, removed when dropped
#[derive(Debug)]
struct LockFile {
    path: PathBuf,
}

impl LockFile {
    async fn acquire(path: PathBuf) -> Result<Self> {
        let started = tokio::time::Instant::now();
        let mut delay = LOCK_RETRY_MIN;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if Self::is_stale(&path).await {
                        warn!("Removing stale lock file {}", path.display());
                        let _ = fs::remove_file(&path).await;
                        continue;
                    }
                    if started.elapsed() >= LOCK_TIMEOUT {
                        return Err(PrivilegeError::persistence(format!(
                            "Timed out waiting for lock {}",
                            path.display()
                        )));
                    }
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(LOCK_RETRY_MAX);
                }
                Err(e) => {
                    return Err(PrivilegeError::persistence(format!(
                        "Failed to create lock {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }
    }

    async fn is_stale(path: &Path) -> bool {
        match fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(modified) => modified
                .elapsed()
                .is_ok_and(|age| age >= STALE_LOCK_AGE),
            Err(_) => false,
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

impl LocalFileStore {
    /// Create a new local store, creating the directory if needed
    pub async fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                PrivilegeError::persistence(format!("Failed to create storage directory: {}", e))
            })?;
        }

        info!("Local privilege storage initialized at: {}", path.display());
        Ok(Self {
            base_path: path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the file holding a resource
    pub fn resource_path(&self, kind: ResourceKind) -> PathBuf {
        self.base_path.join(format!("{}.json", kind))
    }

    fn lock_path(&self, kind: ResourceKind) -> PathBuf {
        self.base_path.join(format!("{}.lock", kind))
    }

    async fn read_resource(&self, kind: ResourceKind) -> Result<Option<StoredResource>> {
        let path = self.resource_path(kind);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PrivilegeError::persistence(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let stored = serde_json::from_str(&content).map_err(|e| {
            PrivilegeError::persistence(format!("Corrupt resource file {}: {}", path.display(), e))
        })?;
        Ok(Some(stored))
    }
}

#[async_trait]
impl PrivilegeStore for LocalFileStore {
    async fn load(&self, kind: ResourceKind) -> Result<Option<StoredResource>> {
        self.read_resource(kind).await
    }

    async fn save(
        &self,
        kind: ResourceKind,
        data: serde_json::Value,
        expected_version: Option<u64>,
    ) -> Result<u64> {
        let _guard = self.write_lock.lock().await;
        let _lock = LockFile::acquire(self.lock_path(kind)).await?;

        let current = self
            .read_resource(kind)
            .await?
            .map_or(0, |stored| stored.version);
        check_version(kind, current, expected_version)?;

        let stored = StoredResource {
            version: current + 1,
            updated_at: chrono::Utc::now(),
            data,
        };
        let content = serde_json::to_vec_pretty(&stored)?;

        // Write to a sibling temp file and rename so readers never see a partial document
        let path = self.resource_path(kind);
        let tmp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", kind, Uuid::new_v4()));
        fs::write(&tmp_path, &content).await.map_err(|e| {
            PrivilegeError::persistence(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(PrivilegeError::persistence(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }

        debug!("Saved {} to {} at version {}", kind, path.display(), stored.version);
        Ok(stored.version)
    }

    async fn health_check(&self) -> Result<()> {
        let metadata = fs::metadata(&self.base_path).await.map_err(|e| {
            PrivilegeError::persistence(format!("Storage directory unavailable: {}", e))
        })?;
        if !metadata.is_dir() {
            return Err(PrivilegeError::persistence(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}
