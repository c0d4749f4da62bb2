//! Command implementations
//!
//! Each command returns plain data; printing lives in `output`.

pub mod assets;
pub mod define;
pub mod solve;

pub use assets::{
    SyncOutcome, cache_status, fetch_asset, resolve_target, should_reload, sync_assets,
};
pub use define::{DefineResult, define_word};
pub use solve::{SolveConfig, SolveResult, solve_puzzle};
