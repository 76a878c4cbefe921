//! CLI Command Handlers
//!
//! Implementation of all CLI commands for QuoteVerse. The CLI is a thin
//! rendering layer: it triggers loads and toggles on the collection and prints
//! whatever the collection projects.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::api_ninjas::{ApiNinjasClient, ApiNinjasConfig};
use crate::adapters::storage::JsonFileStorage;
use crate::application::{CollectionManager, LoadOutcome, PreferenceStore};
use crate::config::{load_config, Config, API_KEY_ENV};
use crate::domain::{DisplayQuote, PreferenceKind, SortMode, CATEGORIES};
use crate::ports::QuoteSourceError;

/// QuoteVerse - browse, search and save quotations
#[derive(Parser, Debug)]
#[command(
    name = "quoteverse",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse, search and save quotations",
    long_about = "QuoteVerse fetches quotations from API Ninjas, lets you filter and \
                  reorder them locally, and remembers the ones you like or bookmark."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/quoteverse.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load quotes and print the filtered, sorted list
    Browse(BrowseCmd),

    /// Print one random quote
    Random,

    /// Toggle the liked mark on a quote
    Like(ToggleCmd),

    /// Toggle the bookmark on a quote
    Bookmark(ToggleCmd),

    /// List liked (or bookmarked) quotes
    Saved(SavedCmd),

    /// List the built-in categories
    Categories,
}

/// Browse quotes
#[derive(Parser, Debug)]
pub struct BrowseCmd {
    /// Restrict to one category (e.g., wisdom)
    #[arg(long, value_name = "CATEGORY", default_value = "")]
    pub category: String,

    /// Case-insensitive search over text, author and category
    #[arg(short, long, value_name = "QUERY", default_value = "")]
    pub search: String,

    /// Sort order: recent, popular or random
    #[arg(long, value_name = "MODE", default_value = "recent")]
    pub sort: SortMode,

    /// Append this many extra batches after the first load
    #[arg(long, value_name = "N", default_value = "0")]
    pub more: u32,
}

/// Toggle a preference
#[derive(Parser, Debug)]
pub struct ToggleCmd {
    /// Exact quote text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// List saved quotes
#[derive(Parser, Debug)]
pub struct SavedCmd {
    /// Show bookmarks instead of likes
    #[arg(short, long)]
    pub bookmarks: bool,
}

type Collection = CollectionManager<ApiNinjasClient, JsonFileStorage>;

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    match app.command {
        Command::Categories => {
            for category in CATEGORIES {
                println!("{}", category);
            }
            Ok(())
        }
        Command::Browse(cmd) => {
            let config = load_config(&app.config).context("Failed to load configuration")?;
            browse_command(&config, cmd).await
        }
        Command::Random => {
            let config = load_config(&app.config).context("Failed to load configuration")?;
            random_command(&config).await
        }
        Command::Like(cmd) => {
            let config = load_config(&app.config).context("Failed to load configuration")?;
            toggle_command(&config, PreferenceKind::Liked, &cmd.text)
        }
        Command::Bookmark(cmd) => {
            let config = load_config(&app.config).context("Failed to load configuration")?;
            toggle_command(&config, PreferenceKind::Bookmarked, &cmd.text)
        }
        Command::Saved(cmd) => {
            let config = load_config(&app.config).context("Failed to load configuration")?;
            let kind = if cmd.bookmarks {
                PreferenceKind::Bookmarked
            } else {
                PreferenceKind::Liked
            };
            saved_command(&config, kind)
        }
    }
}

fn open_preferences(config: &Config) -> PreferenceStore<JsonFileStorage> {
    PreferenceStore::load(JsonFileStorage::new(config.storage.data_dir_path()))
}

fn build_collection(config: &Config) -> Result<Collection> {
    let client = ApiNinjasClient::with_config(ApiNinjasConfig::from(config))
        .context("Failed to create API Ninjas client")?;
    Ok(CollectionManager::new(client, open_preferences(config))
        .with_unscoped_batches(config.api.unscoped_batches))
}

async fn browse_command(config: &Config, cmd: BrowseCmd) -> Result<()> {
    let collection = build_collection(config)?;

    check_outcome(collection.select_category(&cmd.category).await)?;
    for _ in 0..cmd.more {
        check_outcome(collection.append_more().await)?;
    }

    collection.set_search_query(cmd.search).await;
    collection.set_sort_mode(cmd.sort).await;

    let rows = collection.display_list().await;
    if rows.is_empty() {
        println!("No quotes found. Try adjusting your search or filters.");
    }
    print_rows(&rows);

    let stats = collection.stats().await;
    println!();
    println!(
        "{} shown / {} loaded | {} liked | {} bookmarked",
        rows.len(),
        stats.total_quotes,
        stats.liked_count,
        stats.bookmarked_count
    );
    Ok(())
}

async fn random_command(config: &Config) -> Result<()> {
    let collection = build_collection(config)?;
    check_outcome(collection.load_one().await)?;
    print_rows(&collection.display_list().await);
    Ok(())
}

fn toggle_command(config: &Config, kind: PreferenceKind, text: &str) -> Result<()> {
    let mut store = open_preferences(config);
    let now_member = store.toggle(kind, text).contains(text);

    let label = match kind {
        PreferenceKind::Liked => "Liked",
        PreferenceKind::Bookmarked => "Bookmarked",
    };
    if now_member {
        println!("{}: \"{}\"", label, text);
    } else {
        println!("Removed from {}: \"{}\"", label.to_lowercase(), text);
    }
    Ok(())
}

fn saved_command(config: &Config, kind: PreferenceKind) -> Result<()> {
    let store = open_preferences(config);
    let set = store.set(kind);
    if set.is_empty() {
        println!("Nothing saved yet.");
    }
    for text in set.iter() {
        println!("\"{}\"", text);
    }
    Ok(())
}

/// Turn a failed load into an error carrying user guidance
fn check_outcome(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Ready { .. } | LoadOutcome::Superseded => Ok(()),
        LoadOutcome::Failed(e) => bail!("{}\n\n{}", e, failure_guidance(&e)),
    }
}

/// User-facing guidance for each failure class
pub fn failure_guidance(error: &QuoteSourceError) -> String {
    match error {
        QuoteSourceError::ConfigurationMissing => format!(
            "To fix this:\n  \
             1. Sign up at https://api-ninjas.com and copy your API key\n  \
             2. Set {} (or add it to .env), or set api_key in your config file",
            API_KEY_ENV
        ),
        QuoteSourceError::Unauthorized => {
            "Invalid API key. Please check your API Ninjas key.".to_string()
        }
        QuoteSourceError::RateLimited => {
            "Rate limit exceeded. Please try again later.".to_string()
        }
        QuoteSourceError::EmptyResult => {
            "The provider returned no quotes. Try another category.".to_string()
        }
        QuoteSourceError::NetworkError(_) => {
            "Failed to fetch quotes. Please check your connection.".to_string()
        }
        QuoteSourceError::Unknown(_) => "Unexpected provider response. Please try again.".to_string(),
    }
}

fn print_rows(rows: &[DisplayQuote]) {
    for (i, row) in rows.iter().enumerate() {
        let mut marks = String::new();
        if row.is_liked {
            marks.push_str(" ♥");
        }
        if row.is_bookmarked {
            marks.push_str(" ★");
        }
        let category = if row.quote.category.is_empty() {
            String::new()
        } else {
            format!(" [{}]", row.quote.category)
        };
        println!("{:>3}. {}{}{}", i + 1, row.quote.citation(), category, marks);
    }
}
