// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env, set up logging, parse command-line arguments
// 2. Validate settings (a missing store URI or seed list is fatal)
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod index;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, CrawlArgs};
use config::{CrawlSettings, FetchSettings, StoreSettings};
use crawl::Crawler;
use fetch::HttpFetcher;
use index::SearchHit;
use store::MongoStore;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "image_crawler=info".into()),
        )
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let store_settings = StoreSettings::from_args(&cli.store)?;

    match cli.command {
        Commands::Crawl(args) => handle_crawl(&store_settings, &args).await,
        Commands::Index => handle_index(&store_settings).await,
        Commands::Search { query, limit, json } => {
            handle_search(&store_settings, &query, limit, json).await
        }
    }
}

// Handles the 'crawl' subcommand
//
// The whole crawl runs under a wall-clock deadline. When it expires the
// current page is abandoned mid-flight; everything already upserted stays.
async fn handle_crawl(store_settings: &StoreSettings, args: &CrawlArgs) -> Result<i32> {
    let settings = CrawlSettings::from_args(args)?;
    let fetcher = HttpFetcher::new(&FetchSettings::from_args(args))
        .context("could not build HTTP client")?;
    let store = MongoStore::connect(store_settings)
        .await
        .context("could not connect to image store")?;

    info!(
        seeds = settings.seeds.len(),
        max_pages = settings.max_pages,
        max_depth = settings.max_depth,
        "starting crawl"
    );

    let deadline = settings.deadline;
    let crawler = Crawler::new(fetcher, store, settings);

    match crawler.run_with_deadline().await {
        Some(summary) => info!(
            pages = summary.pages_processed,
            failed = summary.pages_failed,
            images = summary.images_found,
            saved = summary.images_saved,
            store_errors = summary.store_errors,
            "crawl finished"
        ),
        None => warn!(deadline_secs = deadline.as_secs(), "crawl deadline reached, stopping"),
    }

    Ok(0)
}

// Handles the 'index' subcommand: rebuilds image_documents and image_terms
async fn handle_index(store_settings: &StoreSettings) -> Result<i32> {
    let store = MongoStore::connect(store_settings)
        .await
        .context("could not connect to image store")?;

    let images = store.load_images().await.context("could not read stored images")?;
    if images.is_empty() {
        warn!("no images stored yet, run the crawler first");
        return Ok(0);
    }
    info!(count = images.len(), "building index");

    let index = index::build_index(&images);
    if index.documents.is_empty() {
        warn!("no images contained any terms, keeping the existing index");
        return Ok(0);
    }
    info!(
        documents = index.documents.len(),
        terms = index.terms.len(),
        "index built"
    );

    store.replace_index(&index).await.context("could not write index")?;
    info!("image index build complete");
    Ok(0)
}

// Handles the 'search' subcommand
async fn handle_search(
    store_settings: &StoreSettings,
    query: &str,
    limit: usize,
    json: bool,
) -> Result<i32> {
    let terms = index::tokenize(query);

    let results = if terms.is_empty() {
        Vec::new()
    } else {
        let store = MongoStore::connect(store_settings)
            .await
            .context("could not connect to image store")?;

        let entries = store.find_terms(&terms).await.context("could not read index")?;
        let ranked = index::rank(&entries, limit);
        let ids: Vec<String> = ranked.iter().map(|(id, _)| id.clone()).collect();
        let documents = store
            .find_documents(&ids)
            .await
            .context("could not read indexed images")?;
        index::hits(&ranked, documents)
    };

    print_results(query, &results, json)?;
    Ok(0)
}

// Prints the results either as a table or JSON
fn print_results(query: &str, results: &[SearchHit], json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "query": query,
            "count": results.len(),
            "results": results,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(results);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(results: &[SearchHit]) {
    if results.is_empty() {
        println!("No images found");
        return;
    }

    println!("{:<8} {:<60} {:<40}", "SCORE", "IMAGE", "SNIPPET");
    println!("{}", "=".repeat(108));

    for hit in results {
        println!(
            "{:<8.3} {:<60} {:<40}",
            hit.score,
            truncate(&hit.file_url, 57),
            truncate(&hit.snippet, 37)
        );
    }

    println!();
    println!("{} result(s)", results.len());
}

// Shortens text for display, respecting char boundaries
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
