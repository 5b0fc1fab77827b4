use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::analytics::{AnalyticsResponse, CountryGrowth, TrendPoint};
use crate::data::{CountryPopulation, CountrySummary, DataRegistry};
use crate::error::PopulationError;
use crate::server::api;

type AppState = Arc<DataRegistry>;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl IntoResponse for PopulationError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }
        let body = ErrorBody {
            status: "error",
            message: &message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for PopulationError {
    fn from(rejection: PathRejection) -> Self {
        PopulationError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for PopulationError {
    fn from(rejection: QueryRejection) -> Self {
        PopulationError::validation(rejection.body_text())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
}

pub fn create_router(registry: Arc<DataRegistry>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/countries", get(countries))
        .route("/api/countries/", get(countries))
        .route("/api/countries/:codes/population", get(population))
        .route("/api/countries/:code/growth/:year", get(growth))
        .route("/api/analytics/trends/:code", get(trends))
        .route("/api/analytics/dashboard", get(dashboard))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(registry)
}

async fn health() -> Json<api::HealthStatus> {
    Json(api::health())
}

async fn countries(State(registry): State<AppState>) -> Json<Vec<CountrySummary>> {
    Json(api::list_countries(&registry))
}

async fn population(
    State(registry): State<AppState>,
    Path(codes): Path<String>,
) -> Result<Json<Vec<CountryPopulation>>, PopulationError> {
    api::population_data(&registry, &codes).map(Json)
}

async fn growth(
    State(registry): State<AppState>,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> Result<Json<CountryGrowth>, PopulationError> {
    let Path((code, year)) = path?;
    api::country_growth(&registry, &code, year).map(Json)
}

async fn trends(
    State(registry): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<TrendsQuery>, QueryRejection>,
) -> Result<Json<Vec<TrendPoint>>, PopulationError> {
    let Query(query) = query?;
    api::trends(&registry, &code, query.start_year, query.end_year).map(Json)
}

async fn dashboard(
    State(registry): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<AnalyticsResponse>, PopulationError> {
    let Query(query) = query?;
    api::dashboard(&registry, query.year).map(Json)
}

async fn route_not_found() -> PopulationError {
    PopulationError::not_found("Route not found")
}
