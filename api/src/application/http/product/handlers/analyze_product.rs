use axum::extract::State;
use foodlens_core::domain::analysis::{
    entities::ProductAnalysis, ports::ProductAnalysisService, value_objects::AnalyzeProductInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    product::validators::AnalyzeProductValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeProductResponse {
    pub data: ProductAnalysis,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "product",
    summary = "Analyze a product",
    description = "Looks the product up by name, classifies its processing level, scores it and ranks healthier alternatives from the same category.",
    responses(
        (status = 200, body = AnalyzeProductResponse),
        (status = 400, body = ApiErrorResponse, description = "Blank or unreadable query"),
        (status = 404, body = ApiErrorResponse, description = "No matching product"),
        (status = 503, body = ApiErrorResponse, description = "Product data source unavailable"),
    ),
    request_body = AnalyzeProductValidator
)]
pub async fn analyze_product(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeProductValidator>,
) -> Result<Response<AnalyzeProductResponse>, ApiError> {
    let analysis = state
        .service
        .analyze_product(AnalyzeProductInput::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeProductResponse { data: analysis }))
}
