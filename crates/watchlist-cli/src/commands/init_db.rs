use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use tracing::info;
use watchlist_config::Config;
use watchlist_sources::{CloudantClient, DocumentStore};

pub async fn run_init_db(config: &Config, output: &Output) -> Result<()> {
    let store = CloudantClient::from_config(&config.database)
        .map_err(|e| eyre!("Invalid database configuration: {}", e))?;

    let created = store
        .ensure_database()
        .await
        .map_err(|e| eyre!("Failed to create database '{}': {}", store.database(), e))?;
    info!(operation = "init_db", database = %store.database(), created, "Database checked");

    match output.format() {
        crate::output::OutputFormat::Human => {
            if created {
                output.success(format!("Created database '{}'", store.database()));
            } else {
                output.info(format!("Database '{}' already exists", store.database()));
            }
        }
        _ => output.json(&json!({
            "database": store.database(),
            "created": created,
        })),
    }
    Ok(())
}
