//! Named cache stores
//!
//! A storage holds any number of named stores; each store maps a request key
//! to a full response. Stores are created on first open and only removed as a
//! whole.

use super::request::AssetResponse;
use crate::error::AssetError;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Create the store if it does not exist yet
    async fn open(&self, name: &str) -> Result<(), AssetError>;

    /// Names of every existing store
    async fn keys(&self) -> Result<Vec<String>, AssetError>;

    /// Remove a store and all its entries; `false` when it did not exist
    async fn delete(&self, name: &str) -> Result<bool, AssetError>;

    async fn get(&self, name: &str, key: &str) -> Result<Option<AssetResponse>, AssetError>;

    async fn put(&self, name: &str, key: &str, response: AssetResponse) -> Result<(), AssetError>;

    /// Store several entries at once; either all are written or none
    async fn put_all(
        &self,
        name: &str,
        entries: Vec<(String, AssetResponse)>,
    ) -> Result<(), AssetError>;

    /// Number of entries in a store, zero when it does not exist
    async fn entry_count(&self, name: &str) -> Result<usize, AssetError>;
}

#[async_trait]
impl<T: CacheStorage + ?Sized> CacheStorage for Arc<T> {
    async fn open(&self, name: &str) -> Result<(), AssetError> {
        (**self).open(name).await
    }

    async fn keys(&self) -> Result<Vec<String>, AssetError> {
        (**self).keys().await
    }

    async fn delete(&self, name: &str) -> Result<bool, AssetError> {
        (**self).delete(name).await
    }

    async fn get(&self, name: &str, key: &str) -> Result<Option<AssetResponse>, AssetError> {
        (**self).get(name, key).await
    }

    async fn put(&self, name: &str, key: &str, response: AssetResponse) -> Result<(), AssetError> {
        (**self).put(name, key, response).await
    }

    async fn put_all(
        &self,
        name: &str,
        entries: Vec<(String, AssetResponse)>,
    ) -> Result<(), AssetError> {
        (**self).put_all(name, entries).await
    }

    async fn entry_count(&self, name: &str) -> Result<usize, AssetError> {
        (**self).entry_count(name).await
    }
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    stores: RwLock<FxHashMap<String, FxHashMap<String, AssetResponse>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn open(&self, name: &str) -> Result<(), AssetError> {
        self.stores
            .write()
            .await
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, AssetError> {
        let mut names: Vec<String> = self.stores.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool, AssetError> {
        Ok(self.stores.write().await.remove(name).is_some())
    }

    async fn get(&self, name: &str, key: &str) -> Result<Option<AssetResponse>, AssetError> {
        Ok(self
            .stores
            .read()
            .await
            .get(name)
            .and_then(|store| store.get(key))
            .cloned())
    }

    async fn put(&self, name: &str, key: &str, response: AssetResponse) -> Result<(), AssetError> {
        self.stores
            .write()
            .await
            .entry(name.to_string())
            .or_default()
            .insert(key.to_string(), response);
        Ok(())
    }

    async fn put_all(
        &self,
        name: &str,
        entries: Vec<(String, AssetResponse)>,
    ) -> Result<(), AssetError> {
        let mut stores = self.stores.write().await;
        stores.entry(name.to_string()).or_default().extend(entries);
        Ok(())
    }

    async fn entry_count(&self, name: &str) -> Result<usize, AssetError> {
        Ok(self.stores.read().await.get(name).map_or(0, FxHashMap::len))
    }
}

/// On-disk layout of one store
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    entries: BTreeMap<String, AssetResponse>,
}

/// Storage persisted as one JSON file per store under a root directory
///
/// Writes go to a temporary file that is renamed into place, so a store on
/// disk is always either the old or the new version.
#[derive(Debug)]
pub struct DiskStorage {
    root: PathBuf,
    write_lock: Mutex<()>,
}

const STORE_EXTENSION: &str = "json";

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn store_path(&self, name: &str) -> Result<PathBuf, AssetError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.starts_with('.');
        if !valid {
            return Err(AssetError::Storage(format!("invalid store name {name:?}")));
        }
        Ok(self.root.join(format!("{name}.{STORE_EXTENSION}")))
    }

    async fn read_store(&self, name: &str) -> Result<Option<StoreFile>, AssetError> {
        let path = self.store_path(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| AssetError::Storage(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_io(&path, &e)),
        }
    }

    async fn write_store(&self, name: &str, store: &StoreFile) -> Result<(), AssetError> {
        let path = self.store_path(name)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| storage_io(&self.root, &e))?;

        let bytes = serde_json::to_vec(store).map_err(|e| AssetError::Storage(e.to_string()))?;
        let tmp = path.with_extension(format!("{STORE_EXTENSION}.tmp"));
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| storage_io(&tmp, &e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| storage_io(&path, &e))?;

        debug!(store = name, entries = store.entries.len(), "store written");
        Ok(())
    }
}

fn storage_io(path: &Path, err: &std::io::Error) -> AssetError {
    AssetError::Storage(format!("{}: {err}", path.display()))
}

#[async_trait]
impl CacheStorage for DiskStorage {
    async fn open(&self, name: &str) -> Result<(), AssetError> {
        let _guard = self.write_lock.lock().await;
        if self.read_store(name).await?.is_none() {
            self.write_store(name, &StoreFile::default()).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, AssetError> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_io(&self.root, &e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| storage_io(&self.root, &e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(STORE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool, AssetError> {
        let _guard = self.write_lock.lock().await;
        let path = self.store_path(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_io(&path, &e)),
        }
    }

    async fn get(&self, name: &str, key: &str) -> Result<Option<AssetResponse>, AssetError> {
        Ok(self
            .read_store(name)
            .await?
            .and_then(|mut store| store.entries.remove(key)))
    }

    async fn put(&self, name: &str, key: &str, response: AssetResponse) -> Result<(), AssetError> {
        self.put_all(name, vec![(key.to_string(), response)]).await
    }

    async fn put_all(
        &self,
        name: &str,
        entries: Vec<(String, AssetResponse)>,
    ) -> Result<(), AssetError> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.read_store(name).await?.unwrap_or_default();
        store.entries.extend(entries);
        self.write_store(name, &store).await
    }

    async fn entry_count(&self, name: &str) -> Result<usize, AssetError> {
        Ok(self
            .read_store(name)
            .await?
            .map_or(0, |store| store.entries.len()))
    }
}
