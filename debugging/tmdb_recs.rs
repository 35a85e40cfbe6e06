//! Run the search-and-recommend sequence against TMDB and print the outcome.
//! Usage:
//!   cargo run --bin tmdb_recs -- movie <title...>
//!   cargo run --bin tmdb_recs -- tv <title...>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::Result;
use dotenvy::dotenv;
use moviepal::config::Config;
use moviepal::models::{ItemView, MediaType, SearchQuery};
use moviepal::recommend::fetch_outcome;
use moviepal::tmdb::TmdbClient;
use serde_json::json;
use std::env;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --bin tmdb_recs -- movie <title...>");
        eprintln!("       cargo run --bin tmdb_recs -- tv <title...>");
        std::process::exit(1);
    }

    let media_type = MediaType::from_str(&args[1])?;
    let title = args[2..].join(" ");

    let config = Config::from_env()?;
    let client = TmdbClient::from_config(&config)?;
    let outcome = fetch_outcome(&client, &SearchQuery::new(title, media_type)).await;

    let items: Vec<ItemView> = outcome
        .items()
        .iter()
        .map(|item| ItemView::from_item(item, &config.image_base))
        .collect();
    let report = json!({
        "status": outcome.status(),
        "count": items.len(),
        "items": items,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
