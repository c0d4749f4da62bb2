//! Asset cache commands
//!
//! Drive an [`AssetCacheManager`] the way an application shell would: bring
//! the configured version up to date, then answer individual requests.

use crate::assets::{
    ActivationReport, AssetCacheManager, AssetRequest, CacheStorage, FetchOutcome, InstallReport,
    Network, ReloadGuard, StoreSummary, WorkerState,
};
use crate::error::AssetError;
use tokio::sync::watch;
use url::Url;

/// What a sync did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The version's store already existed and was adopted as-is
    AlreadyCurrent { version: String },
    /// The version was installed and activated, replacing older stores
    Installed {
        install: InstallReport,
        activation: ActivationReport,
    },
}

/// Make the manager's version the active one
///
/// Reuses an existing store for the same version; otherwise installs the
/// manifest and immediately skips waiting.
///
/// # Errors
/// `InstallFailed` when any asset cannot be fetched (the previous version
/// stays untouched), or storage errors.
pub async fn sync_assets<S, N, F>(
    manager: &AssetCacheManager<S, N>,
    on_fetched: F,
) -> Result<SyncOutcome, AssetError>
where
    S: CacheStorage,
    N: Network,
    F: FnMut(&AssetRequest) + Send,
{
    if manager.restore().await? {
        return Ok(SyncOutcome::AlreadyCurrent {
            version: manager.version().to_string(),
        });
    }

    let install = manager.install_with(on_fetched).await?;
    let activation = manager.skip_waiting().await?;
    Ok(SyncOutcome::Installed {
        install,
        activation,
    })
}

/// Whether a shell watching `changes` should reload now
///
/// True only when the manager became active since the receiver last looked
/// and the guard has not fired yet, so one activation never causes two
/// reloads.
pub fn should_reload(changes: &mut watch::Receiver<WorkerState>, guard: &ReloadGuard) -> bool {
    let changed = changes.has_changed().unwrap_or(false);
    let active = *changes.borrow_and_update() == WorkerState::Active;
    changed && active && guard.claim()
}

/// Resolve a CLI target: absolute URLs pass through, paths join the origin
///
/// # Errors
/// `InvalidUrl` when the target cannot be resolved.
pub fn resolve_target(origin: &Url, target: &str) -> Result<AssetRequest, AssetError> {
    let resolved = Url::parse(target).or_else(|_| origin.join(target));
    resolved
        .map(AssetRequest::get)
        .map_err(|e| AssetError::InvalidUrl {
            url: target.to_string(),
            reason: e.to_string(),
        })
}

/// Fetch one request through the cache, resuming an active version first
///
/// # Errors
/// Network errors when the response is not cached.
pub async fn fetch_asset<S: CacheStorage, N: Network>(
    manager: &AssetCacheManager<S, N>,
    request: &AssetRequest,
) -> Result<FetchOutcome, AssetError> {
    manager.restore().await?;
    manager.handle_fetch(request).await
}

/// # Errors
/// Storage errors from enumerating stores.
pub async fn cache_status<S: CacheStorage, N: Network>(
    manager: &AssetCacheManager<S, N>,
) -> Result<Vec<StoreSummary>, AssetError> {
    manager.status().await
}
