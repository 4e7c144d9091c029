use axum::extract::State;
use foodlens_core::domain::analysis::{entities::ProductComparison, ports::ProductAnalysisService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    product::validators::CompareProductsValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompareProductsResponse {
    pub data: ProductComparison,
}

#[utoipa::path(
    post,
    path = "/compare",
    tag = "product",
    summary = "Compare two products",
    description = "Analyzes both products concurrently. A failure on one side is reported in place of its analysis and leaves the other side intact.",
    responses(
        (status = 200, body = CompareProductsResponse),
        (status = 422, body = ApiErrorResponse, description = "Invalid request body"),
    ),
    request_body = CompareProductsValidator
)]
pub async fn compare_products(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CompareProductsValidator>,
) -> Result<Response<CompareProductsResponse>, ApiError> {
    let comparison = state.service.compare_products(payload.into()).await;

    Ok(Response::OK(CompareProductsResponse { data: comparison }))
}
