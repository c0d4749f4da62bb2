//! Honeycomb - CLI
//!
//! Spelling Bee solver with TUI and CLI modes, definition lookup, and an
//! offline asset cache.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use honeycomb::{
    assets::{AssetCacheManager, DiskStorage, HttpNetwork, ReloadGuard},
    commands::{
        SolveConfig, SyncOutcome, cache_status, define_word, fetch_asset, resolve_target,
        should_reload, solve_puzzle, sync_assets,
    },
    config::AppConfig,
    definitions::{DefinitionService, HttpDefinitionLookup},
    logging,
    output::{
        print_cache_status, print_definition, print_fetch_outcome, print_solve_result,
        print_sync_outcome,
    },
    wordlists::{WordListCache, source_from_setting},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "honeycomb",
    about = "Spelling Bee solver with definitions and an offline asset cache",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ./honeycomb.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Word list: 'embedded', a file path, or an http(s) URL
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Solve a puzzle and list every valid word
    Solve {
        /// The six outer letters
        outer: String,

        /// The required center letter
        center: String,
    },

    /// Look up the definition of a word
    Define {
        /// Word to define
        word: String,
    },

    /// Manage the offline asset cache
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },
}

#[derive(Subcommand)]
enum AssetsAction {
    /// Install the configured cache version and drop older ones
    Sync,

    /// Fetch one asset through the cache
    Fetch {
        /// Path relative to the origin, or an absolute URL
        target: String,
    },

    /// Show stored cache versions
    Status,
}

type Manager = AssetCacheManager<DiskStorage, HttpNetwork>;

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(wordlist) = &cli.wordlist {
        config.wordlist.clone_from(wordlist);
    }
    config.validate()?;
    Ok(config)
}

fn build_manager(config: &AppConfig, client: &reqwest::Client) -> Result<Manager> {
    let manager = AssetCacheManager::new(
        config.manifest(),
        config.origin_url()?,
        DiskStorage::new(&config.assets.cache_dir),
        HttpNetwork::new(client.clone()),
    )
    .with_excluded_origins(config.assets.excluded_origins.iter().cloned());
    Ok(manager)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would corrupt the TUI screen
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);
    if !matches!(command, Commands::Play) {
        logging::init(cli.verbose);
    }

    let config = load_config(&cli)?;
    let client = reqwest::Client::new();

    match command {
        Commands::Play => run_play_command(&config, &client),
        Commands::Solve { outer, center } => {
            run_solve_command(&config, &client, outer, center, cli.verbose).await
        }
        Commands::Define { word } => run_define_command(&config, &client, word).await,
        Commands::Assets { action } => {
            let manager = build_manager(&config, &client)?;
            match action {
                AssetsAction::Sync => run_sync_command(&manager).await,
                AssetsAction::Fetch { target } => run_fetch_command(&manager, target).await,
                AssetsAction::Status => {
                    let stores = cache_status(&manager).await?;
                    print_cache_status(manager.version(), &stores);
                    Ok(())
                }
            }
        }
    }
}

fn word_list_cache(config: &AppConfig, client: &reqwest::Client) -> WordListCache {
    WordListCache::new(source_from_setting(&config.wordlist, client))
}

fn definition_service(config: &AppConfig, client: &reqwest::Client) -> Result<DefinitionService> {
    let lookup = HttpDefinitionLookup::new(client.clone(), config.lookup_url()?);
    Ok(DefinitionService::new(Box::new(lookup)))
}

async fn run_solve_command(
    config: &AppConfig,
    client: &reqwest::Client,
    outer: &str,
    center: &str,
    verbose: bool,
) -> Result<()> {
    let words = word_list_cache(config, client);
    let result = solve_puzzle(&SolveConfig::new(outer, center), &words).await?;
    print_solve_result(&result, verbose);
    Ok(())
}

async fn run_define_command(
    config: &AppConfig,
    client: &reqwest::Client,
    word: &str,
) -> Result<()> {
    let service = definition_service(config, client)?;
    let result = define_word(&service, word).await?;
    print_definition(&result);
    Ok(())
}

async fn run_sync_command(manager: &Manager) -> Result<()> {
    let pb = ProgressBar::new(manager.manifest().asset_paths().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} | {msg}")?
            .progress_chars("█▓▒░"),
    );

    let guard = ReloadGuard::new();
    let mut changes = manager.subscribe();

    let outcome = sync_assets(manager, |request| {
        pb.set_message(request.url().path().to_string());
        pb.inc(1);
    })
    .await;
    pb.finish_and_clear();

    let outcome = outcome?;
    print_sync_outcome(&outcome);

    // Served assets switch over only when a new version was installed
    if matches!(outcome, SyncOutcome::Installed { .. }) && should_reload(&mut changes, &guard) {
        let stores = cache_status(manager).await?;
        tracing::info!(
            version = manager.version(),
            stores = stores.len(),
            "new asset version active, reloaded"
        );
    }
    Ok(())
}

async fn run_fetch_command(manager: &Manager, target: &str) -> Result<()> {
    let request = resolve_target(manager.origin(), target)?;
    let outcome = fetch_asset(manager, &request).await?;
    print_fetch_outcome(&outcome);
    Ok(())
}

fn run_play_command(config: &AppConfig, client: &reqwest::Client) -> Result<()> {
    use honeycomb::interactive::{App, run_tui};

    let words = Arc::new(word_list_cache(config, client));
    let definitions = Arc::new(definition_service(config, client)?);

    // The TUI blocks on terminal input while lookups run as tasks
    tokio::task::block_in_place(|| run_tui(App::new(), words, definitions))
}
