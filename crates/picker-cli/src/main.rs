mod feed;
mod pick;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use picker_catalog::{CatalogClient, CatalogFeed};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "picker")]
#[command(about = "Browse the product catalog and build a discounted product list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog and print every product loaded.
    Search {
        /// Search text; omit to list the whole catalog.
        query: Option<String>,
        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Select products and variants, commit them, and print the list as JSON.
    Pick(pick::PickArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = picker_core::load_picker_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "loaded picker configuration");

    let client = Arc::new(CatalogClient::from_config(&config)?);
    let mut feed = CatalogFeed::from_config(client, &config);

    match cli.command {
        Commands::Search { query, pages } => {
            feed::load_pages(&mut feed, query.as_deref().unwrap_or_default(), pages).await;
            feed::print_catalog(feed.catalog());
        }
        Commands::Pick(args) => pick::run(&config, &mut feed, &args).await?,
    }

    Ok(())
}
