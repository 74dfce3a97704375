mod report;

use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use grocer_core::{AppConfig, CatalogueType};
use grocer_redpepper::{
    fetch_circular, find_store_and_catalogue, find_store_by_city, get_first_page_url,
    list_all_stores, RedPepperClient,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "grocer-cli")]
#[command(about = "Fetch the current ShopRite circular page images")]
struct Cli {
    /// Store to look up; defaults to `GROCER_DEFAULT_STORE_ID`
    #[arg(long, value_name = "ID")]
    store_id: Option<String>,

    /// Find the store by city name (partial match); takes precedence over --store-id
    #[arg(long, value_name = "NAME")]
    city: Option<String>,

    /// List all available stores
    #[arg(long)]
    list_stores: bool,

    /// Circular type: weekly, wellness, hispanic, or all
    #[arg(
        long = "type",
        value_name = "TYPE",
        default_value_t = CatalogueType::Weekly,
        value_parser = CatalogueType::from_str
    )]
    catalogue_type: CatalogueType,

    /// Print only the first page URL of the weekly circular
    #[arg(long, conflicts_with_all = ["city", "list_stores", "catalogue_type", "json"])]
    first_page: bool,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = grocer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli, &config).await
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let client = RedPepperClient::with_base_url(
        &config.redpepper_base_url,
        &config.redpepper_client_id,
        config.request_timeout_secs,
        &config.redpepper_user_agent,
    )?;
    let store_id = cli
        .store_id
        .clone()
        .unwrap_or_else(|| config.default_store_id.clone());

    if cli.list_stores {
        if !cli.json {
            println!("Fetching store list...\n");
        }
        let stores = list_all_stores(&client)
            .await
            .context("Failed to fetch store list")?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&stores)?);
        } else {
            print!("{}", report::StoreList(&stores));
        }
        return Ok(());
    }

    if cli.first_page {
        let url = get_first_page_url(&client, &store_id)
            .await
            .context("Could not find store")?
            .context("Circular has no pages")?;
        println!("{url}");
        return Ok(());
    }

    tracing::debug!(
        store_id = %store_id,
        city = cli.city.as_deref(),
        catalogue_type = %cli.catalogue_type,
        "resolving circular"
    );
    let store = match cli.city.as_deref() {
        Some(city) => {
            let resolution = find_store_by_city(&client, city, cli.catalogue_type)
                .await
                .context("Could not find store")?;
            if resolution.matches.len() > 1 && !cli.json {
                print!(
                    "{}",
                    report::MultipleMatches {
                        city,
                        matches: &resolution.matches,
                    }
                );
            }
            resolution.store
        }
        None => find_store_and_catalogue(&client, &store_id, cli.catalogue_type)
            .await
            .context("Could not find store")?,
    };

    let circular = fetch_circular(&client, store)
        .await
        .context("Failed to fetch circular pages")?;
    if circular.pages.is_empty() {
        anyhow::bail!("Circular {} has no pages", circular.store.catalogue_id);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&circular)?);
    } else {
        print!("{}", report::CircularReport(&circular));
    }
    Ok(())
}
