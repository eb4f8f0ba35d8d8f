//! HTTP handler functions for the SIGACT map API.
//!
//! Every data route goes through [`Dataset::ready`] first, so requests
//! that arrive before the load finishes get a `503` instead of an empty
//! answer.
//!
//! [`Dataset::ready`]: sigact_map_ingest::dataset::Dataset::ready

use actix_web::http::header::{ContentType, RETRY_AFTER};
use actix_web::{HttpResponse, web};
use sigact_map_analytics as analytics;
use sigact_map_analytics_models::IncidentFilter;
use sigact_map_ingest::dataset::{LoadState, NotReady};
use sigact_map_ingest::store::IncidentStore;
use sigact_map_server_models::{ApiError, ApiHealth, ApiIncident, ApiStatus, IncidentQueryParams};

use crate::AppState;

/// Seconds a client should wait before retrying a `503`.
const RETRY_AFTER_SECS: &str = "5";

/// Maps a [`NotReady`] into the retryable `503` response.
fn not_ready(e: NotReady) -> HttpResponse {
    let error = match e.state {
        LoadState::Failed => "Incident data failed to load",
        _ => "Incident data is still loading",
    };

    HttpResponse::ServiceUnavailable()
        .insert_header((RETRY_AFTER, RETRY_AFTER_SECS))
        .json(ApiError {
            error: error.to_string(),
            state: Some(e.state.to_string()),
        })
}

/// Runs `f` against the loaded store, or answers `503` if there is none.
fn with_store<F>(state: &AppState, f: F) -> HttpResponse
where
    F: FnOnce(&IncidentStore) -> HttpResponse,
{
    match state.dataset.ready() {
        Ok(store) => f(store),
        Err(e) => not_ready(e),
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/status`
///
/// Reports the dataset lifecycle state, with a summary once ready.
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    let dataset = &state.dataset;
    HttpResponse::Ok().json(ApiStatus {
        state: dataset.state().to_string(),
        summary: dataset.ready().ok().map(analytics::summary),
        error: dataset.failure().map(ToOwned::to_owned),
    })
}

/// `GET /api/dates`
///
/// Returns every date with at least one incident, ascending.
pub async fn dates(state: web::Data<AppState>) -> HttpResponse {
    with_store(&state, |store| {
        HttpResponse::Ok().json(analytics::list_dates(store))
    })
}

/// `GET /api/metadata`
///
/// Returns the distinct types, categories, and provinces for filter
/// dropdowns.
pub async fn metadata(state: web::Data<AppState>) -> HttpResponse {
    with_store(&state, |store| {
        HttpResponse::Ok().json(analytics::list_metadata(store))
    })
}

/// `GET /api/incidents`
///
/// Returns the incidents on `date`, narrowed by the optional `type`,
/// `category`, and `province` filters.
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<IncidentQueryParams>,
) -> HttpResponse {
    with_store(&state, |store| {
        let Some(date) = params.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) else {
            return HttpResponse::BadRequest().json(ApiError::new("Missing required parameter: date"));
        };

        let filter = IncidentFilter::from(&*params);
        let incidents: Vec<ApiIncident> = analytics::lookup_incidents(store, date, &filter)
            .into_iter()
            .map(ApiIncident::from)
            .collect();

        log::debug!("{} incidents on {date} match {filter:?}", incidents.len());

        HttpResponse::Ok().json(incidents)
    })
}

/// `GET /api/treemap`
pub async fn treemap(state: web::Data<AppState>) -> HttpResponse {
    with_store(&state, |store| {
        HttpResponse::Ok().json(analytics::treemap(store))
    })
}

/// `GET /api/radar`
pub async fn radar(state: web::Data<AppState>) -> HttpResponse {
    with_store(&state, |store| HttpResponse::Ok().json(analytics::radar(store)))
}

/// `GET /api/heatmap`
pub async fn heatmap(state: web::Data<AppState>) -> HttpResponse {
    with_store(&state, |store| {
        HttpResponse::Ok().json(analytics::heatmap(store))
    })
}

/// `GET /api/boundary`
///
/// Returns the province boundary GeoJSON exactly as it was loaded.
pub async fn boundary(state: web::Data<AppState>) -> HttpResponse {
    with_store(&state, |store| match analytics::boundary(store) {
        Some(boundary) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(boundary.as_str().to_owned()),
        None => HttpResponse::NotFound().json(ApiError::new("No boundary data available")),
    })
}
