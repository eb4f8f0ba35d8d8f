#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the SIGACT map application.
//!
//! Serves read-only queries over an in-memory incident dataset: date
//! lookups with flat equality filters, filter metadata, and the treemap,
//! radar, and heatmap aggregates. The dataset is loaded on a blocking
//! worker after the server binds; until it is ready every data route
//! answers `503`. A failed load stops the server.

pub mod config;
mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_rt::task::JoinHandle;
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, middleware, web};
use sigact_map_ingest::LoadOptions;
use sigact_map_ingest::dataset::{Dataset, LoadState};

use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// The incident dataset and its load lifecycle.
    pub dataset: Arc<Dataset>,
}

/// Registers the `/api` routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/status", web::get().to(handlers::status))
            .route("/dates", web::get().to(handlers::dates))
            .route("/metadata", web::get().to(handlers::metadata))
            .route("/incidents", web::get().to(handlers::incidents))
            .route("/treemap", web::get().to(handlers::treemap))
            .route("/radar", web::get().to(handlers::radar))
            .route("/heatmap", web::get().to(handlers::heatmap))
            .route("/boundary", web::get().to(handlers::boundary)),
    );
}

/// Loads the dataset on a blocking worker. Stops the server if the load
/// fails, since there is nothing to serve without data.
async fn load_dataset(
    dataset: Arc<Dataset>,
    config: ServerConfig,
    server: ServerHandle,
) -> Result<(), String> {
    let options = LoadOptions {
        delimiter: config.delimiter,
    };

    let result = actix_rt::task::spawn_blocking(move || {
        dataset.load_path(&config.data_path, config.boundary_path.as_deref(), &options)
    })
    .await;

    let failure = match result {
        Ok(Ok(())) => {
            log::info!("Dataset ready, serving queries");
            return Ok(());
        }
        Ok(Err(e)) => format!("Failed to load incident data: {e}"),
        Err(e) => format!("Incident loader panicked: {e}"),
    };

    log::error!("{failure}; shutting down");
    server.stop(true).await;
    Err(failure)
}

/// Starts the SIGACT map API server.
///
/// Binds the HTTP server, then loads the dataset in the background. This
/// is a regular async function; the caller is responsible for providing
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind,
/// encounters a runtime error, or was stopped because the dataset failed
/// to load.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let dataset = Arc::new(Dataset::new());
    let state = web::Data::new(AppState {
        dataset: Arc::clone(&dataset),
    });

    let static_dir = config.static_dir.clone();
    if static_dir.is_dir() {
        log::info!("Serving frontend from {}", static_dir.display());
    } else {
        log::info!(
            "No frontend directory at {}, serving API only",
            static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes);

        if static_dir.is_dir() {
            app.service(Files::new("/", &static_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run();

    let loader = actix_rt::spawn(load_dataset(Arc::clone(&dataset), config, server.handle()));

    server.await?;

    load_outcome(&dataset, loader).await
}

/// Turns the loader's result into the server's exit status once the
/// server has stopped.
///
/// A loader that stopped the server may still be returning, and one that
/// panicked never publishes a generation, so any dataset still `Loading`
/// waits for its loader.
async fn load_outcome(
    dataset: &Dataset,
    loader: JoinHandle<Result<(), String>>,
) -> std::io::Result<()> {
    if let Some(failure) = dataset.failure() {
        return Err(std::io::Error::other(format!(
            "Failed to load incident data: {failure}"
        )));
    }

    if dataset.state() != LoadState::Loading {
        return Ok(());
    }

    match loader.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(failure)) => Err(std::io::Error::other(failure)),
        Err(e) => Err(std::io::Error::other(format!(
            "Incident loader panicked: {e}"
        ))),
    }
}
