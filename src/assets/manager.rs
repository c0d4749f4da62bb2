//! Versioned asset cache manager
//!
//! Lifecycle: `Uninstalled -> Installing -> Installed (waiting) -> Activating -> Active`.
//! A failed install drops back to `Uninstalled` and leaves no store behind.
//! Requests are only intercepted once the manager is active.

use super::manifest::CacheManifest;
use super::network::Network;
use super::request::{AssetRequest, AssetResponse};
use super::storage::CacheStorage;
use crate::error::AssetError;
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

/// Origin of the definition service; never cached
pub const DEFAULT_EXCLUDED_ORIGIN: &str = "https://api.dictionaryapi.dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Uninstalled,
    Installing,
    /// Installed and waiting for the signal to take over
    Installed,
    Activating,
    Active,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninstalled => "uninstalled",
            Self::Installing => "installing",
            Self::Installed => "installed (waiting)",
            Self::Activating => "activating",
            Self::Active => "active",
        };
        f.write_str(name)
    }
}

/// Signals a waiting version can receive from the application shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    SkipWaiting,
}

/// Where a fetched response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Served from the versioned store
    Cache,
    /// Fetched from the network by the manager
    Network,
    /// Not intercepted; went straight to the network
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub response: AssetResponse,
    pub source: FetchSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub version: String,
    pub assets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub version: String,
    pub deleted: Vec<String>,
}

/// Name and size of one store, for status views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub name: String,
    pub entries: usize,
    pub current: bool,
}

/// Serves the application's own assets from a versioned cache
pub struct AssetCacheManager<S: CacheStorage, N: Network> {
    manifest: CacheManifest,
    origin: Url,
    excluded_origins: Vec<String>,
    storage: S,
    network: N,
    state: watch::Sender<WorkerState>,
}

impl<S: CacheStorage, N: Network> AssetCacheManager<S, N> {
    /// Create a manager for one manifest version
    ///
    /// `origin` is the application's own base URL; manifest paths resolve
    /// against it and only same-origin responses are cached at runtime.
    pub fn new(manifest: CacheManifest, origin: Url, storage: S, network: N) -> Self {
        let (state, _) = watch::channel(WorkerState::Uninstalled);
        Self {
            manifest,
            origin,
            excluded_origins: vec![DEFAULT_EXCLUDED_ORIGIN.to_string()],
            storage,
            network,
            state,
        }
    }

    /// Replace the set of origins that bypass the cache entirely
    #[must_use]
    pub fn with_excluded_origins<I, T>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.excluded_origins = origins
            .into_iter()
            .map(|o| o.as_ref().trim().trim_end_matches('/').to_string())
            .collect();
        self
    }

    #[must_use]
    pub fn version(&self) -> &str {
        self.manifest.version()
    }

    #[must_use]
    pub const fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    #[must_use]
    pub const fn origin(&self) -> &Url {
        &self.origin
    }

    #[must_use]
    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// Watch state changes; shells use this to learn about activation
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WorkerState> {
        self.state.subscribe()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn transition(
        &self,
        action: &'static str,
        from: WorkerState,
        to: WorkerState,
    ) -> Result<(), AssetError> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                result = Err(AssetError::InvalidTransition {
                    action,
                    state: state.to_string(),
                });
                false
            }
        });
        result
    }

    fn set_state(&self, to: WorkerState) {
        self.state.send_replace(to);
    }

    /// Fetch every manifest asset and store them under the version name
    ///
    /// # Errors
    /// Returns `InstallFailed` naming the first asset that could not be
    /// fetched or answered with a non-success status. Nothing is stored in
    /// that case and the manager returns to `Uninstalled`.
    pub async fn install(&self) -> Result<InstallReport, AssetError> {
        self.install_with(|_| {}).await
    }

    /// [`install`](Self::install) with a callback after each fetched asset
    ///
    /// # Errors
    /// See [`install`](Self::install).
    pub async fn install_with<F>(&self, on_fetched: F) -> Result<InstallReport, AssetError>
    where
        F: FnMut(&AssetRequest) + Send,
    {
        self.transition("install", WorkerState::Uninstalled, WorkerState::Installing)?;
        info!(version = self.version(), "installing asset cache");

        match self.fetch_manifest(on_fetched).await {
            Ok(report) => {
                self.set_state(WorkerState::Installed);
                info!(version = %report.version, assets = report.assets, "asset cache installed");
                Ok(report)
            }
            Err(e) => {
                self.set_state(WorkerState::Uninstalled);
                warn!(version = self.version(), error = %e, "asset cache install failed");
                Err(e)
            }
        }
    }

    async fn fetch_manifest<F>(&self, mut on_fetched: F) -> Result<InstallReport, AssetError>
    where
        F: FnMut(&AssetRequest) + Send,
    {
        let requests = self.manifest.requests(&self.origin)?;
        let mut entries = Vec::with_capacity(requests.len());

        for request in &requests {
            let install_failed = |reason: String| AssetError::InstallFailed {
                path: request.url().to_string(),
                reason,
            };

            let response = self
                .network
                .fetch(request)
                .await
                .map_err(|e| install_failed(e.to_string()))?;
            if !response.is_success() {
                return Err(install_failed(format!("HTTP {}", response.status)));
            }

            on_fetched(request);
            entries.push((request.key(), response));
        }

        let assets = entries.len();
        if let Err(e) = self.storage.put_all(self.version(), entries).await {
            // A backend may have created the store before failing
            if let Err(cleanup) = self.storage.delete(self.version()).await {
                warn!(version = self.version(), error = %cleanup, "could not remove partial store");
            }
            return Err(e);
        }

        Ok(InstallReport {
            version: self.version().to_string(),
            assets,
        })
    }

    /// Delete every store except the current version and start intercepting
    ///
    /// # Errors
    /// `InvalidTransition` unless installed and waiting; storage errors from
    /// enumerating or deleting stores (the manager then stays installed).
    pub async fn activate(&self) -> Result<ActivationReport, AssetError> {
        self.transition("activate", WorkerState::Installed, WorkerState::Activating)?;

        match self.delete_stale_stores().await {
            Ok(deleted) => {
                self.set_state(WorkerState::Active);
                info!(version = self.version(), deleted = ?deleted, "asset cache active");
                Ok(ActivationReport {
                    version: self.version().to_string(),
                    deleted,
                })
            }
            Err(e) => {
                self.set_state(WorkerState::Installed);
                Err(e)
            }
        }
    }

    async fn delete_stale_stores(&self) -> Result<Vec<String>, AssetError> {
        let mut deleted = Vec::new();
        for name in self.storage.keys().await? {
            if name != self.version() && self.storage.delete(&name).await? {
                debug!(store = %name, "deleted stale cache store");
                deleted.push(name);
            }
        }
        Ok(deleted)
    }

    /// Adopt a waiting version immediately
    ///
    /// # Errors
    /// `InvalidTransition` when no installed version is waiting.
    pub async fn skip_waiting(&self) -> Result<ActivationReport, AssetError> {
        match self.state() {
            WorkerState::Installed => self.activate().await,
            state => Err(AssetError::InvalidTransition {
                action: "skip waiting",
                state: state.to_string(),
            }),
        }
    }

    /// Handle a control message from the application shell
    ///
    /// # Errors
    /// See [`skip_waiting`](Self::skip_waiting).
    pub async fn post_message(
        &self,
        message: ControlMessage,
    ) -> Result<Option<ActivationReport>, AssetError> {
        match message {
            ControlMessage::SkipWaiting => self.skip_waiting().await.map(Some),
        }
    }

    /// Resume as active when this version's store is already complete
    ///
    /// Used when a previous process installed the same version. Stale stores
    /// are deleted first, exactly as in [`activate`](Self::activate), so an
    /// activation that was interrupted is finished here. A store missing any
    /// manifest asset is not adopted.
    ///
    /// # Errors
    /// Storage errors from reading or deleting stores; the manager then stays
    /// uninstalled.
    pub async fn restore(&self) -> Result<bool, AssetError> {
        if self.state() != WorkerState::Uninstalled {
            return Ok(self.state() == WorkerState::Active);
        }

        if !self.store_is_complete().await? {
            return Ok(false);
        }

        self.transition("restore", WorkerState::Uninstalled, WorkerState::Activating)?;
        match self.delete_stale_stores().await {
            Ok(deleted) => {
                self.set_state(WorkerState::Active);
                info!(version = self.version(), deleted = ?deleted, "restored active asset cache");
                Ok(true)
            }
            Err(e) => {
                self.set_state(WorkerState::Uninstalled);
                Err(e)
            }
        }
    }

    async fn store_is_complete(&self) -> Result<bool, AssetError> {
        let exists = self
            .storage
            .keys()
            .await?
            .iter()
            .any(|name| name == self.version());
        if !exists {
            return Ok(false);
        }

        for request in self.manifest.requests(&self.origin)? {
            if self.storage.get(self.version(), &request.key()).await?.is_none() {
                debug!(version = self.version(), key = %request.key(), "stored version is incomplete");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn is_excluded(&self, request: &AssetRequest) -> bool {
        let origin = request.origin();
        self.excluded_origins.iter().any(|o| *o == origin)
    }

    fn is_own_origin(&self, request: &AssetRequest) -> bool {
        request.origin() == self.origin.origin().ascii_serialization()
    }

    /// Answer a request: pass-through, cache hit, or network with caching
    ///
    /// # Errors
    /// Network errors when the response has to come from the network. A
    /// failed cache read falls back to the network; a failed cache write is
    /// logged and ignored.
    pub async fn handle_fetch(&self, request: &AssetRequest) -> Result<FetchOutcome, AssetError> {
        if self.state() != WorkerState::Active || self.is_excluded(request) {
            let response = self.network.fetch(request).await?;
            return Ok(FetchOutcome {
                response,
                source: FetchSource::Passthrough,
            });
        }

        let key = request.key();
        match self.storage.get(self.version(), &key).await {
            Ok(Some(response)) => {
                debug!(%key, "asset cache hit");
                return Ok(FetchOutcome {
                    response,
                    source: FetchSource::Cache,
                });
            }
            Ok(None) => debug!(%key, "asset cache miss"),
            Err(e) => warn!(%key, error = %e, "asset cache read failed"),
        }

        let response = self.network.fetch(request).await?;

        if response.is_success() && request.is_read_only() && self.is_own_origin(request) {
            if let Err(e) = self
                .storage
                .put(self.version(), &key, response.clone())
                .await
            {
                warn!(%key, error = %e, "asset cache write failed");
            }
        }

        Ok(FetchOutcome {
            response,
            source: FetchSource::Network,
        })
    }

    /// Stores currently present, marking the one this manager owns
    ///
    /// # Errors
    /// Storage errors from enumerating or counting.
    pub async fn status(&self) -> Result<Vec<StoreSummary>, AssetError> {
        let mut summaries = Vec::new();
        for name in self.storage.keys().await? {
            let entries = self.storage.entry_count(&name).await?;
            summaries.push(StoreSummary {
                current: name == self.version(),
                name,
                entries,
            });
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const ORIGIN: &str = "https://honeycomb.example/";

    /// Network that answers from a fixed table and records every URL
    #[derive(Clone, Default)]
    struct FakeNetwork {
        missing: Vec<String>,
        offline: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeNetwork {
        fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Network for FakeNetwork {
        async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse, AssetError> {
            let url = request.url().to_string();
            self.calls.lock().unwrap().push(url.clone());
            if self.offline {
                return Err(AssetError::Network {
                    url,
                    reason: "offline".to_string(),
                });
            }
            if self.missing.iter().any(|m| url.ends_with(m.as_str())) {
                return Ok(AssetResponse::new(404, Vec::new()));
            }
            Ok(AssetResponse::new(200, url.into_bytes()))
        }
    }

    fn manifest(version: &str) -> CacheManifest {
        CacheManifest::new(
            version,
            vec![
                "./".to_string(),
                "./app.js".to_string(),
                "./wordlist.txt".to_string(),
            ],
        )
    }

    fn manager(
        version: &str,
        storage: &Arc<MemoryStorage>,
        network: FakeNetwork,
    ) -> AssetCacheManager<Arc<MemoryStorage>, FakeNetwork> {
        AssetCacheManager::new(
            manifest(version),
            Url::parse(ORIGIN).unwrap(),
            Arc::clone(storage),
            network,
        )
    }

    fn get(url: &str) -> AssetRequest {
        AssetRequest::parse_get(url).unwrap()
    }

    #[tokio::test]
    async fn install_stores_every_asset() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = manager("v1", &storage, FakeNetwork::default());

        let report = manager.install().await.unwrap();

        assert_eq!(report.assets, 3);
        assert_eq!(manager.state(), WorkerState::Installed);
        assert_eq!(storage.entry_count("v1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn install_reports_progress() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = manager("v1", &storage, FakeNetwork::default());
        let mut seen = Vec::new();

        manager
            .install_with(|req| seen.push(req.url().path().to_string()))
            .await
            .unwrap();

        assert_eq!(seen, vec!["/", "/app.js", "/wordlist.txt"]);
    }

    #[tokio::test]
    async fn failed_asset_fails_whole_install() {
        let storage = Arc::new(MemoryStorage::new());
        let network = FakeNetwork {
            missing: vec!["app.js".to_string()],
            ..FakeNetwork::default()
        };
        let manager = manager("v1", &storage, network);

        let err = manager.install().await.unwrap_err();

        assert!(matches!(err, AssetError::InstallFailed { ref path, .. } if path.ends_with("app.js")));
        assert_eq!(manager.state(), WorkerState::Uninstalled);
        assert!(storage.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn install_can_retry_after_failure() {
        let storage = Arc::new(MemoryStorage::new());
        let offline = manager(
            "v1",
            &storage,
            FakeNetwork {
                offline: true,
                ..FakeNetwork::default()
            },
        );
        assert!(offline.install().await.is_err());
        assert!(offline.install().await.is_err());
        assert_eq!(offline.state(), WorkerState::Uninstalled);
    }

    #[tokio::test]
    async fn activate_requires_install() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = manager("v1", &storage, FakeNetwork::default());

        assert!(matches!(
            manager.activate().await,
            Err(AssetError::InvalidTransition { .. })
        ));
        assert!(manager.skip_waiting().await.is_err());
    }

    #[tokio::test]
    async fn new_version_replaces_old_store() {
        let storage = Arc::new(MemoryStorage::new());

        let v1 = manager("v1", &storage, FakeNetwork::default());
        v1.install().await.unwrap();
        v1.activate().await.unwrap();

        let v2 = manager("v2", &storage, FakeNetwork::default());
        v2.install().await.unwrap();
        assert_eq!(storage.keys().await.unwrap(), vec!["v1", "v2"]);

        let report = v2
            .post_message(ControlMessage::SkipWaiting)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.deleted, vec!["v1"]);
        assert_eq!(storage.keys().await.unwrap(), vec!["v2"]);
        assert_eq!(v2.state(), WorkerState::Active);
    }

    #[tokio::test]
    async fn subscribers_see_activation() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = manager("v1", &storage, FakeNetwork::default());
        let mut rx = manager.subscribe();

        manager.install().await.unwrap();
        manager.skip_waiting().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), WorkerState::Active);
    }

    #[tokio::test]
    async fn not_intercepting_before_activation() {
        let storage = Arc::new(MemoryStorage::new());
        let network = FakeNetwork::default();
        let manager = manager("v1", &storage, network.clone());
        manager.install().await.unwrap();

        let outcome = manager
            .handle_fetch(&get("https://honeycomb.example/other.css"))
            .await
            .unwrap();

        assert_eq!(outcome.source, FetchSource::Passthrough);
        assert_eq!(storage.entry_count("v1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn cache_first_after_activation() {
        let storage = Arc::new(MemoryStorage::new());
        let network = FakeNetwork::default();
        let manager = manager("v1", &storage, network.clone());
        manager.install().await.unwrap();
        manager.activate().await.unwrap();
        let installs = network.calls();

        let outcome = manager
            .handle_fetch(&get("https://honeycomb.example/app.js"))
            .await
            .unwrap();

        assert_eq!(outcome.source, FetchSource::Cache);
        assert_eq!(outcome.response.body, b"https://honeycomb.example/app.js");
        assert_eq!(network.calls(), installs);
    }

    #[tokio::test]
    async fn miss_is_fetched_and_cached() {
        let storage = Arc::new(MemoryStorage::new());
        let network = FakeNetwork::default();
        let manager = manager("v1", &storage, network.clone());
        manager.install().await.unwrap();
        manager.activate().await.unwrap();
        let request = get("https://honeycomb.example/extra.css");

        let first = manager.handle_fetch(&request).await.unwrap();
        let second = manager.handle_fetch(&request).await.unwrap();

        assert_eq!(first.source, FetchSource::Network);
        assert_eq!(second.source, FetchSource::Cache);
        assert_eq!(first.response, second.response);
    }

    #[tokio::test]
    async fn failures_and_foreign_origins_are_not_cached() {
        let storage = Arc::new(MemoryStorage::new());
        let network = FakeNetwork {
            missing: vec!["gone.css".to_string()],
            ..FakeNetwork::default()
        };
        let manager = manager("v1", &storage, network);
        manager.install().await.unwrap();
        manager.activate().await.unwrap();

        let missing = manager
            .handle_fetch(&get("https://honeycomb.example/gone.css"))
            .await
            .unwrap();
        assert_eq!(missing.response.status, 404);

        let foreign = manager
            .handle_fetch(&get("https://cdn.example/font.ttf"))
            .await
            .unwrap();
        assert_eq!(foreign.source, FetchSource::Network);

        let post = AssetRequest::new(
            reqwest::Method::POST,
            Url::parse("https://honeycomb.example/submit").unwrap(),
        );
        manager.handle_fetch(&post).await.unwrap();

        assert_eq!(storage.entry_count("v1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn excluded_origin_never_cached() {
        let storage = Arc::new(MemoryStorage::new());
        let network = FakeNetwork::default();
        let manager = manager("v1", &storage, network.clone());
        manager.install().await.unwrap();
        manager.activate().await.unwrap();
        let request = get("https://api.dictionaryapi.dev/api/v2/entries/en/pill");

        for _ in 0..3 {
            let outcome = manager.handle_fetch(&request).await.unwrap();
            assert_eq!(outcome.source, FetchSource::Passthrough);
        }

        for store in storage.keys().await.unwrap() {
            assert_eq!(storage.get(&store, &request.key()).await.unwrap(), None);
        }
        assert_eq!(storage.entry_count("v1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn custom_excluded_origins() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = manager("v1", &storage, FakeNetwork::default())
            .with_excluded_origins(["https://honeycomb.example/"]);
        manager.install().await.unwrap();
        manager.activate().await.unwrap();

        let outcome = manager
            .handle_fetch(&get("https://honeycomb.example/app.js"))
            .await
            .unwrap();
        assert_eq!(outcome.source, FetchSource::Passthrough);
    }

    #[tokio::test]
    async fn network_error_propagates_on_miss() {
        let storage = Arc::new(MemoryStorage::new());
        manager("v1", &storage, FakeNetwork::default())
            .install()
            .await
            .unwrap();
        let manager = manager(
            "v1",
            &storage,
            FakeNetwork {
                offline: true,
                ..FakeNetwork::default()
            },
        );
        assert!(manager.restore().await.unwrap());

        let err = manager
            .handle_fetch(&get("https://honeycomb.example/extra.css"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::Network { .. }));
    }

    #[tokio::test]
    async fn restore_requires_existing_store() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = manager("v1", &storage, FakeNetwork::default());

        assert!(!manager.restore().await.unwrap());
        assert_eq!(manager.state(), WorkerState::Uninstalled);
    }

    #[tokio::test]
    async fn restore_skips_incomplete_store() {
        let storage = Arc::new(MemoryStorage::new());
        storage.open("v1").await.unwrap();
        storage
            .put(
                "v1",
                &get("https://honeycomb.example/app.js").key(),
                AssetResponse::new(200, Vec::new()),
            )
            .await
            .unwrap();
        let manager = manager("v1", &storage, FakeNetwork::default());

        assert!(!manager.restore().await.unwrap());
        assert_eq!(manager.state(), WorkerState::Uninstalled);

        // A normal install completes the store
        manager.install().await.unwrap();
        manager.activate().await.unwrap();
        assert_eq!(storage.entry_count("v1").await.unwrap(), 3);
    }

    /// Storage that fails chosen operations a set number of times
    struct FlakyStorage {
        inner: MemoryStorage,
        put_all_failures: AtomicUsize,
        delete_failures: AtomicUsize,
    }

    impl FlakyStorage {
        fn failing(put_all: usize, delete: usize) -> Arc<Self> {
            Arc::new(Self {
                inner: MemoryStorage::new(),
                put_all_failures: AtomicUsize::new(put_all),
                delete_failures: AtomicUsize::new(delete),
            })
        }

        fn take_failure(counter: &AtomicUsize) -> bool {
            counter
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl CacheStorage for FlakyStorage {
        async fn open(&self, name: &str) -> Result<(), AssetError> {
            self.inner.open(name).await
        }

        async fn keys(&self) -> Result<Vec<String>, AssetError> {
            self.inner.keys().await
        }

        async fn delete(&self, name: &str) -> Result<bool, AssetError> {
            if Self::take_failure(&self.delete_failures) {
                return Err(AssetError::Storage("delete failed".to_string()));
            }
            self.inner.delete(name).await
        }

        async fn get(&self, name: &str, key: &str) -> Result<Option<AssetResponse>, AssetError> {
            self.inner.get(name, key).await
        }

        async fn put(
            &self,
            name: &str,
            key: &str,
            response: AssetResponse,
        ) -> Result<(), AssetError> {
            self.inner.put(name, key, response).await
        }

        async fn put_all(
            &self,
            name: &str,
            entries: Vec<(String, AssetResponse)>,
        ) -> Result<(), AssetError> {
            if Self::take_failure(&self.put_all_failures) {
                // Leave an empty store behind, as a half-finished write would
                self.inner.open(name).await?;
                return Err(AssetError::Storage("disk full".to_string()));
            }
            self.inner.put_all(name, entries).await
        }

        async fn entry_count(&self, name: &str) -> Result<usize, AssetError> {
            self.inner.entry_count(name).await
        }
    }

    fn flaky_manager(
        version: &str,
        storage: &Arc<FlakyStorage>,
    ) -> AssetCacheManager<Arc<FlakyStorage>, FakeNetwork> {
        AssetCacheManager::new(
            manifest(version),
            Url::parse(ORIGIN).unwrap(),
            Arc::clone(storage),
            FakeNetwork::default(),
        )
    }

    #[tokio::test]
    async fn failed_store_write_leaves_no_store() {
        let storage = FlakyStorage::failing(0, 0);
        let v1 = flaky_manager("v1", &storage);
        v1.install().await.unwrap();
        v1.activate().await.unwrap();

        storage.put_all_failures.store(1, Ordering::SeqCst);
        let v2 = flaky_manager("v2", &storage);
        assert!(matches!(
            v2.install().await,
            Err(AssetError::Storage(_))
        ));
        assert_eq!(v2.state(), WorkerState::Uninstalled);
        assert_eq!(storage.keys().await.unwrap(), vec!["v1"]);

        // The next run must install again rather than adopt an empty store
        let retry = flaky_manager("v2", &storage);
        assert!(!retry.restore().await.unwrap());
        retry.install().await.unwrap();
        retry.activate().await.unwrap();
        assert_eq!(storage.keys().await.unwrap(), vec!["v2"]);
        assert_eq!(storage.entry_count("v2").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn restore_finishes_interrupted_activation() {
        let storage = FlakyStorage::failing(0, 1);
        let v1 = flaky_manager("v1", &storage);
        v1.install().await.unwrap();
        // Nothing stale yet, so the pending delete failure is not consumed
        v1.activate().await.unwrap();

        let v2 = flaky_manager("v2", &storage);
        v2.install().await.unwrap();
        assert!(matches!(
            v2.activate().await,
            Err(AssetError::Storage(_))
        ));
        assert_eq!(v2.state(), WorkerState::Installed);
        assert_eq!(storage.keys().await.unwrap(), vec!["v1", "v2"]);

        let restarted = flaky_manager("v2", &storage);
        assert!(restarted.restore().await.unwrap());
        assert_eq!(restarted.state(), WorkerState::Active);
        assert_eq!(storage.keys().await.unwrap(), vec!["v2"]);
    }

    #[tokio::test]
    async fn restore_failure_stays_uninstalled() {
        let storage = FlakyStorage::failing(0, 0);
        let v1 = flaky_manager("v1", &storage);
        v1.install().await.unwrap();
        let v2 = flaky_manager("v2", &storage);
        v2.install().await.unwrap();

        storage.delete_failures.store(1, Ordering::SeqCst);
        let restarted = flaky_manager("v2", &storage);
        assert!(restarted.restore().await.is_err());
        assert_eq!(restarted.state(), WorkerState::Uninstalled);

        assert!(restarted.restore().await.unwrap());
        assert_eq!(storage.keys().await.unwrap(), vec!["v2"]);
    }

    #[tokio::test]
    async fn status_marks_current_store() {
        let storage = Arc::new(MemoryStorage::new());
        storage.open("old").await.unwrap();
        let manager = manager("v1", &storage, FakeNetwork::default());
        manager.install().await.unwrap();

        let status = manager.status().await.unwrap();

        assert_eq!(
            status,
            vec![
                StoreSummary {
                    name: "old".to_string(),
                    entries: 0,
                    current: false
                },
                StoreSummary {
                    name: "v1".to_string(),
                    entries: 3,
                    current: true
                },
            ]
        );
    }
}
