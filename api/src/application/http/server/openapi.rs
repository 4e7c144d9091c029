use crate::application::http::{
    health_score::router::HealthScoreApiDoc, processing::router::ProcessingApiDoc,
    product::router::ProductApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FoodLens API",
        description = "Processing classification, health scoring and healthier alternatives for food products"
    ),
    nest(
        (path = "/products", api = ProductApiDoc),
        (path = "/processing", api = ProcessingApiDoc),
        (path = "/health-score", api = HealthScoreApiDoc),
    )
)]
pub struct ApiDoc;
