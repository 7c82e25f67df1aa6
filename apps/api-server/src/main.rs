//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_infra::database::{PostgresConnector, SchemaScript, schema};

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::{AppConfig, InitConfig};
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;
    tracing::debug!(database = ?config.database, "Configuration loaded");

    let connector = PostgresConnector::new(&config.database);

    // Must finish before the server accepts connections
    bootstrap_schema(&connector, &config.init).await?;

    let state = AppState::new(Arc::new(connector));

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

/// Apply the schema, waiting for the database to come up.
///
/// Exhausting the retries only aborts startup when `DB_INIT_STRICT` is set;
/// otherwise the server starts anyway and requests fail until the database
/// is reachable and initialized.
async fn bootstrap_schema(
    connector: &PostgresConnector,
    init: &InitConfig,
) -> anyhow::Result<()> {
    let script = match &init.schema_path {
        Some(path) => SchemaScript::from_file(path).await?,
        None => SchemaScript::embedded(),
    };

    match schema::initialize(|| connector.open(), &script, &init.retry).await {
        Ok(()) => Ok(()),
        Err(err) if init.strict => Err(err.into()),
        Err(err) => {
            tracing::error!(
                error = %err,
                "Schema not applied; serving without an initialized database"
            );
            Ok(())
        }
    }
}
