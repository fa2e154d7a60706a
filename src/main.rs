use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tradematch::config::{Settings, StoreBackend};
use tradematch::core::Matcher;
use tradematch::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use tradematch::models::ScoringWeights;
use tradematch::routes::{self, AppState};
use tradematch::services::{InMemoryProfileStore, MatchFinder, PostgresProfileStore, ProfileStore};
use tradematch::telemetry;

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_store(settings: &Settings) -> io::Result<Arc<dyn ProfileStore>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            let store = match &settings.store.seed_path {
                Some(path) => InMemoryProfileStore::from_seed_file(path)
                    .await
                    .map_err(|e| startup_error("Failed to load seed data", e))?,
                None => InMemoryProfileStore::new(),
            };

            info!("In-memory profile store initialized");
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let database = settings.database.as_ref().ok_or_else(|| {
                startup_error("Configuration error", "store.backend = postgres requires [database]")
            })?;

            let store = PostgresProfileStore::from_settings(
                &database.url,
                database.max_connections,
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| startup_error("PostgreSQL connection error", e))?;

            info!(
                "PostgreSQL profile store initialized (max: {} connections)",
                database.max_connections.unwrap_or(10)
            );
            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| startup_error("Configuration error", e))?;

    telemetry::init(&settings.logging).map_err(|e| startup_error("Logging error", e))?;

    info!("Starting TradeMatch matchmaking service...");

    let store = build_store(&settings).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    // Initialize matcher with configured weights
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights, settings.matching.min_score);

    info!(
        "Matcher initialized with weights: {:?}, min score: {}",
        weights, settings.matching.min_score
    );

    let app_state = AppState::new(
        store.clone(),
        MatchFinder::new(store, matcher),
        settings.matching.clone(),
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
