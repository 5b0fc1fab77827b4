use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use poptrends::data::DataRegistry;
use poptrends::server::create_router;
use tower::ServiceExt;

fn app() -> Router {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/countries.tsv");
    let registry = DataRegistry::load(path, None).expect("fixture registry should load");
    create_router(registry)
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let payload = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, payload)
}

#[tokio::test]
async fn health_endpoints_report_healthy() {
    for uri in ["/health", "/api/health"] {
        let (status, payload) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["status"], "healthy");
    }
}

#[tokio::test]
async fn countries_endpoint_lists_non_aggregates() {
    let (status, payload) = get("/api/countries").await;
    assert_eq!(status, StatusCode::OK);

    let countries = payload.as_array().expect("countries should be an array");
    assert_eq!(countries.len(), 11);
    assert_eq!(countries[0]["country_name"], "Alphaland");
    assert_eq!(countries[0]["country_code"], "ALP");
    assert!(countries.iter().all(|c| c["country_code"] != "AFE"));
}

#[tokio::test]
async fn population_endpoint_returns_partial_matches() {
    let (status, payload) = get("/api/countries/ALP,NOPE/population").await;
    assert_eq!(status, StatusCode::OK);

    let rows = payload.as_array().expect("population should be an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["population"]["1960"], 100.0);
    assert_eq!(rows[0]["population"]["1961"], 110.0);
    assert!(rows[0]["population"].get("1962").is_none());
}

#[tokio::test]
async fn population_endpoint_rejects_blank_codes_and_total_miss() {
    let (status, payload) = get("/api/countries/ALP,,CHN/population").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["status"], "error");

    let (status, payload) = get("/api/countries/NOPE/population").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "No data found for specified countries");
}

#[tokio::test]
async fn growth_endpoint_reports_windows() {
    let (status, payload) = get("/api/countries/ALP/growth/1961").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["one_year"]["absolute"], 10);
    assert_eq!(payload["one_year"]["percentage"], 10.0);
    assert!(payload["three_year"]["absolute"].is_null());
    assert!(payload["five_year"]["percentage"].is_null());
}

#[tokio::test]
async fn growth_endpoint_validates_year_and_code() {
    let (status, payload) = get("/api/countries/CHN/growth/1959").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Year must be between 1960 and 2022");

    let (status, _) = get("/api/countries/XYZ/growth/2000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get("/api/countries/ALP/growth/2000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trends_endpoint_applies_bounds() {
    let (status, payload) = get("/api/analytics/trends/ALP?start_year=1960&end_year=1961").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload,
        serde_json::json!([
            {"year": 1960, "population": 100.0, "growth_rate": null},
            {"year": 1961, "population": 110.0, "growth_rate": 10.0}
        ])
    );
}

#[tokio::test]
async fn trends_endpoint_rejects_bad_ranges_and_empty_results() {
    let (status, payload) = get("/api/analytics/trends/CHN?start_year=2000&end_year=1990").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        payload["message"],
        "Start year must be less than or equal to end year"
    );

    let (status, _) = get("/api/analytics/trends/CHN?start_year=1950").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, payload) = get("/api/analytics/trends/NOD").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "No population trends found for country code NOD");
}

#[tokio::test]
async fn dashboard_defaults_to_latest_year() {
    let (status, payload) = get("/api/analytics/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["year"], 2022);

    let distribution = &payload["population_distribution"];
    assert_eq!(distribution["ranges"][0], "<1M");
    assert_eq!(distribution["counts"], serde_json::json!([2, 0, 2, 1, 2, 2]));
    assert_eq!(
        distribution["countries_in_range"][">500M"],
        serde_json::json!(["China", "India"])
    );
    assert_eq!(payload["top_growing_countries"][0]["country_code"], "MEX");
    assert_eq!(payload["top_populated_countries"][0]["country_code"], "CHN");
    assert_eq!(payload["regional_data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn dashboard_rejects_out_of_range_year() {
    let (status, payload) = get("/api/analytics/dashboard?year=2023").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["status"], "error");
}

#[tokio::test]
async fn non_numeric_years_are_json_validation_errors() {
    for uri in [
        "/api/countries/CHN/growth/abc",
        "/api/analytics/dashboard?year=abc",
        "/api/analytics/dashboard?year=",
        "/api/analytics/trends/CHN?start_year=x",
    ] {
        let (status, payload) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(payload["status"], "error", "{uri}");
        assert!(payload["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn unknown_route_is_not_found_json() {
    let (status, payload) = get("/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "Route not found");
}
