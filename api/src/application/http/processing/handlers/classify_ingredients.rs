use foodlens_core::domain::processing::{entities::ClassificationResult, classify_processing};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    processing::validators::ClassifyIngredientsValidator,
    server::api_entities::{
        api_error::{ApiError, ApiErrorResponse, ValidateJson},
        response::Response,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassifyIngredientsResponse {
    pub data: ClassificationResult,
}

#[utoipa::path(
    post,
    path = "/classify",
    tag = "processing",
    summary = "Classify ingredient text",
    description = "Assigns a NOVA processing tier to an ingredient list without looking the product up.",
    responses(
        (status = 200, body = ClassifyIngredientsResponse),
        (status = 422, body = ApiErrorResponse, description = "Invalid request body"),
    ),
    request_body = ClassifyIngredientsValidator
)]
pub async fn classify_ingredients(
    ValidateJson(payload): ValidateJson<ClassifyIngredientsValidator>,
) -> Result<Response<ClassifyIngredientsResponse>, ApiError> {
    let classification = classify_processing(
        &payload.ingredients_text,
        &payload.additives,
        payload.upstream_tier,
    );

    Ok(Response::OK(ClassifyIngredientsResponse {
        data: classification,
    }))
}
