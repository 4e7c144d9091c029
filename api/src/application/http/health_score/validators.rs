use foodlens_core::domain::{processing::entities::ProcessingTier, product::entities::Nutrients};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScoreNutrientsValidator {
    /// Values per 100g keyed like `sugars_100g`; missing keys count as zero
    #[serde(default)]
    pub nutrients: Nutrients,

    /// Unknown tiers score from the neutral base
    #[serde(default)]
    pub tier: Option<ProcessingTier>,
}
