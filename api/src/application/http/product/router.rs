use super::handlers::analyze_product::{__path_analyze_product, analyze_product};
use super::handlers::compare_products::{__path_compare_products, compare_products};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_product, compare_products))]
pub struct ProductApiDoc;

pub fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/products/analyze", state.args.server.root_path),
            post(analyze_product),
        )
        .route(
            &format!("{}/products/compare", state.args.server.root_path),
            post(compare_products),
        )
}
