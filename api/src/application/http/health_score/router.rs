use super::handlers::score_nutrients::{__path_score_nutrients, score_nutrients};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(score_nutrients))]
pub struct HealthScoreApiDoc;

pub fn health_score_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/health-score", state.args.server.root_path),
        post(score_nutrients),
    )
}
