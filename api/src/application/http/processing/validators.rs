use foodlens_core::domain::processing::entities::ProcessingTier;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClassifyIngredientsValidator {
    /// Comma separated ingredient list as printed on the label
    #[validate(length(max = 10000, message = "ingredients_text is too long"))]
    pub ingredients_text: String,

    /// Additive tags such as `en:e330`
    #[serde(default)]
    pub additives: Vec<String>,

    /// Tier already assigned by the data source, if any
    #[serde(default)]
    pub upstream_tier: Option<ProcessingTier>,
}
