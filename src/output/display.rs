//! Display functions for command results

use super::formatters::{DefinitionView, format_size};
use crate::assets::{FetchOutcome, FetchSource, StoreSummary};
use crate::commands::{DefineResult, SolveResult, SyncOutcome};
use colored::Colorize;

/// Print ranked answers, grouped by length
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Puzzle: center {} outer {}",
        result.spec.center().to_ascii_uppercase().to_string().bright_yellow().bold(),
        result.spec.outer().to_uppercase().bright_white()
    );
    println!("{}", "─".repeat(60).cyan());

    for (len, words) in result.by_length() {
        println!("\n{}", format!("{len} letters ({})", words.len()).bright_cyan().bold());
        for word in words {
            println!("  {word}");
        }
    }

    println!();
    if result.words.is_empty() {
        println!("{}", result.summary().yellow().bold());
    } else {
        println!("{}", result.summary().green().bold());
    }
    if verbose {
        println!("Searched {} dictionary entries", result.scanned);
    }
}

pub fn print_definition(result: &DefineResult) {
    let view = DefinitionView::from_entries(&result.word, &result.entries);

    println!("\n{}", view.heading().bright_yellow().bold());
    if view.is_empty() {
        println!("No usable definition data returned.");
        return;
    }

    for section in &view.sections {
        println!("\n{}", section.part_of_speech.bright_cyan().bold());
        for (i, (definition, example)) in section.definitions.iter().enumerate() {
            println!("  {}. {definition}", i + 1);
            if let Some(example) = example {
                println!("     {}", format!("Example: {example}").bright_black().italic());
            }
        }
    }
}

pub fn print_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::AlreadyCurrent { version } => {
            println!("{} {version} is already active", "✓".green());
        }
        SyncOutcome::Installed {
            install,
            activation,
        } => {
            println!(
                "{} Installed {} ({} assets)",
                "✓".green(),
                install.version.bright_yellow().bold(),
                install.assets
            );
            for name in &activation.deleted {
                println!("  removed old cache {}", name.bright_black());
            }
        }
    }
}

pub fn print_fetch_outcome(outcome: &FetchOutcome) {
    let source = match outcome.source {
        FetchSource::Cache => "cache".green(),
        FetchSource::Network => "network".yellow(),
        FetchSource::Passthrough => "network (not cached)".bright_black(),
    };
    println!(
        "HTTP {} from {}, {}",
        outcome.response.status,
        source,
        format_size(outcome.response.body.len())
    );
}

pub fn print_cache_status(version: &str, stores: &[StoreSummary]) {
    println!("Configured version: {}", version.bright_yellow().bold());
    if stores.is_empty() {
        println!("No cache stores.");
        return;
    }
    for store in stores {
        let marker = if store.current { "*".green() } else { " ".normal() };
        println!("{marker} {:<30} {} entries", store.name, store.entries);
    }
}
