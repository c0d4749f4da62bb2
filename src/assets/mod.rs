//! Offline asset cache
//!
//! Pre-caches the application shell under a version name, swaps versions
//! wholesale on activation, and answers requests cache-first. The definition
//! service origin is never cached.

mod manager;
mod manifest;
mod network;
mod reload;
mod request;
mod storage;

pub use manager::{
    ActivationReport, AssetCacheManager, ControlMessage, DEFAULT_EXCLUDED_ORIGIN, FetchOutcome,
    FetchSource, InstallReport, StoreSummary, WorkerState,
};
pub use manifest::{BUILD_CACHE_VERSION, CacheManifest, DEFAULT_ASSET_PATHS};
pub use network::{HttpNetwork, Network};
pub use reload::ReloadGuard;
pub use request::{AssetRequest, AssetResponse};
pub use storage::{CacheStorage, DiskStorage, MemoryStorage};
