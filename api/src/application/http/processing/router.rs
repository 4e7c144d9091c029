use super::handlers::classify_ingredients::{__path_classify_ingredients, classify_ingredients};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(classify_ingredients))]
pub struct ProcessingApiDoc;

pub fn processing_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/processing/classify", state.args.server.root_path),
        post(classify_ingredients),
    )
}
