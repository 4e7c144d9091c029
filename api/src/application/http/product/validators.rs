use foodlens_core::domain::analysis::value_objects::{
    AlternativesPolicy, AnalyzeProductInput, CompareProductsInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_include_alternatives() -> bool {
    true
}

/// A blank query is reported as malformed input by the pipeline itself
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnalyzeProductValidator {
    #[validate(length(max = 200, message = "query is too long"))]
    pub query: String,

    #[serde(default = "default_include_alternatives")]
    pub include_alternatives: bool,

    #[serde(default)]
    pub alternatives_policy: Option<AlternativesPolicy>,

    #[serde(default)]
    #[validate(range(max = 20, message = "at most 20 alternatives can be requested"))]
    pub max_alternatives: Option<usize>,
}

impl From<AnalyzeProductValidator> for AnalyzeProductInput {
    fn from(payload: AnalyzeProductValidator) -> Self {
        AnalyzeProductInput {
            query: payload.query,
            include_alternatives: payload.include_alternatives,
            alternatives_policy: payload.alternatives_policy,
            max_alternatives: payload.max_alternatives,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompareProductsValidator {
    #[validate(nested)]
    pub first: AnalyzeProductValidator,

    #[validate(nested)]
    pub second: AnalyzeProductValidator,
}

impl From<CompareProductsValidator> for CompareProductsInput {
    fn from(payload: CompareProductsValidator) -> Self {
        CompareProductsInput {
            first: payload.first.into(),
            second: payload.second.into(),
        }
    }
}
