use foodlens_core::domain::health_score::{assess_health, entities::HealthAssessment};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    health_score::validators::ScoreNutrientsValidator,
    server::api_entities::{
        api_error::{ApiError, ApiErrorResponse, ValidateJson},
        response::Response,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreNutrientsResponse {
    pub data: HealthAssessment,
}

#[utoipa::path(
    post,
    path = "",
    tag = "health-score",
    summary = "Score nutrients",
    description = "Computes the 0-100 health score for nutrient values per 100g and an optional processing tier.",
    responses(
        (status = 200, body = ScoreNutrientsResponse),
        (status = 400, body = ApiErrorResponse, description = "Unreadable request body"),
    ),
    request_body = ScoreNutrientsValidator
)]
pub async fn score_nutrients(
    ValidateJson(payload): ValidateJson<ScoreNutrientsValidator>,
) -> Result<Response<ScoreNutrientsResponse>, ApiError> {
    let assessment = assess_health(&payload.nutrients, payload.tier);

    Ok(Response::OK(ScoreNutrientsResponse { data: assessment }))
}
