use std::sync::Arc;

use crate::application::http::health::health_routes;
use crate::application::http::health_score::router::health_score_routes;
use crate::application::http::processing::router::processing_routes;
use crate::application::http::product::router::product_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use foodlens_core::{application::create_service, domain::common::AdvisorConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = AdvisorConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid allowed origin {:?}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT]);

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(SwaggerUi::new(format!("{}/swagger-ui", root_path)).url(api_docs_url, openapi))
        .merge(product_routes(state.clone()))
        .merge(processing_routes(state.clone()))
        .merge(health_score_routes(state.clone()))
        .merge(health_routes(&root_path))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use clap::Parser;
    use serde_json::{Value, json};

    async fn server() -> TestServer {
        let args = Args::parse_from([
            "foodlens-api",
            "--open-food-facts-url",
            "http://127.0.0.1:1",
            "--open-food-facts-timeout-secs",
            "1",
            "--open-food-facts-max-retries",
            "1",
        ]);
        let state = state(Arc::new(args)).await.unwrap();
        TestServer::new(router(state).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_live() {
        let server = server().await;
        let response = server.get("/health/live").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn test_classify_soft_drink() {
        let server = server().await;
        let response = server
            .post("/processing/classify")
            .json(&json!({
                "ingredients_text": "water, sugar, citric acid, natural flavor, potassium sorbate, red 40"
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["tier"], 4);
        assert_eq!(body["data"]["tier_name"], "Ultra-Processed Foods");
        assert_eq!(body["data"]["key_indicators"], json!(["natural flavor", "red 40"]));
    }

    #[tokio::test]
    async fn test_classify_rejects_unknown_tier() {
        let server = server().await;
        let response = server
            .post("/processing/classify")
            .json(&json!({ "ingredients_text": "apples", "upstream_tier": 9 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "malformed_input");
    }

    #[tokio::test]
    async fn test_score_nutrients() {
        let server = server().await;
        let response = server
            .post("/health-score")
            .json(&json!({
                "nutrients": { "sugars_100g": 10, "salt_100g": 0.5 },
                "tier": 3
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        // 60 - 10 * 1.5 - 0.5 * 10
        assert_eq!(body["data"]["score"], 40.0);
        assert_eq!(body["data"]["interpretation"], "Poor");
        assert_eq!(body["data"]["nutrient_levels"]["sugar"], "moderate");
    }

    #[tokio::test]
    async fn test_score_without_tier_uses_neutral_base() {
        let server = server().await;
        let response = server.post("/health-score").json(&json!({})).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["score"], 50.0);
    }

    #[tokio::test]
    async fn test_analyze_blank_query_is_malformed() {
        let server = server().await;
        let response = server
            .post("/products/analyze")
            .json(&json!({ "query": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "malformed_input");
    }

    #[tokio::test]
    async fn test_analyze_validation_failure() {
        let server = server().await;
        let response = server
            .post("/products/analyze")
            .json(&json!({ "query": "cola", "max_alternatives": 50 }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["error"], "validation_failed");
    }

    #[tokio::test]
    async fn test_analyze_with_unreachable_upstream() {
        let server = server().await;
        let response = server
            .post("/products/analyze")
            .json(&json!({ "query": "cola" }))
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["error"], "upstream_unavailable");
    }

    #[tokio::test]
    async fn test_compare_reports_each_side() {
        let server = server().await;
        let response = server
            .post("/products/compare")
            .json(&json!({
                "first": { "query": "cola" },
                "second": { "query": "" }
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["first"]["error"], "upstream_unavailable");
        assert_eq!(body["data"]["second"]["error"], "malformed_input");
        assert_eq!(body["data"]["healthier"], Value::Null);
    }

    #[tokio::test]
    async fn test_swagger_document_is_served() {
        let server = server().await;
        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert!(body["paths"]["/products/analyze"].is_object());
        assert!(body["paths"]["/health-score"].is_object());
    }
}
