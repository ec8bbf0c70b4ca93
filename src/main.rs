use anyhow::Result;
use cardbase::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config/cardbase.yaml";
const DEFAULT_CATALOG: &str = "data/cards.json";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = env_or("CARDBASE_CONFIG", DEFAULT_CONFIG);
    let catalog_path = env_or("CARDBASE_CATALOG", DEFAULT_CATALOG);
    let addr = env_or("CARDBASE_ADDR", DEFAULT_ADDR);

    let config = CatalogConfig::from_yaml_file(&config_path)?;
    tracing::info!(
        path = %config_path,
        sets = config.sets_in_order.len(),
        "Loaded catalog configuration"
    );

    let catalog = InMemoryCatalog::from_json_file(&catalog_path)?;

    ServerBuilder::new()
        .with_catalog(catalog)
        .with_config(config)
        .serve(&addr)
        .await
}
