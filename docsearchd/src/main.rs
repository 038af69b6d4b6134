use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use docsearchd::config::UpstreamConfig;
use docsearchd::query::{LooseInt, SearchOptions};
use docsearchd::upstream::DocsClient;

const USAGE: &str = "usage: docsearchd <query> [page] [per_page]";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Logs go to stderr; stdout carries only the JSON payload.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(query) = args.next() else {
        bail!(USAGE);
    };
    let options = SearchOptions {
        page: args.next().map(LooseInt::from),
        per_page: args.next().map(LooseInt::from),
    };
    if args.next().is_some() {
        bail!(USAGE);
    }

    let cfg = UpstreamConfig::from_env();
    let client = DocsClient::new_http(cfg).context("failed to build upstream client")?;

    let outcome = docsearchd::search(&client, &query, &options).await;
    let body = serde_json::to_string_pretty(&outcome).context("failed to encode outcome")?;
    println!("{body}");
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
