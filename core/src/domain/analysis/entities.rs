use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    alternatives::entities::{AlternativeCandidate, AlternativeSuggestions},
    common::{
        entities::app_errors::{CoreError, ErrorReport},
        generate_timestamp,
    },
    health_score::entities::HealthAssessment,
    processing::entities::ClassificationResult,
    product::entities::{ProductRecord, ProductSummary},
};

/// Complete result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductAnalysis {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub product: ProductSummary,
    pub classification: ClassificationResult,
    pub assessment: HealthAssessment,
    pub alternatives: Vec<AlternativeCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives_message: Option<String>,
}

impl ProductAnalysis {
    pub fn new(
        product: &ProductRecord,
        classification: ClassificationResult,
        assessment: HealthAssessment,
        suggestions: AlternativeSuggestions,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            analyzed_at: now,
            product: ProductSummary::from(product),
            classification,
            assessment,
            alternatives: suggestions.alternatives,
            alternatives_message: suggestions.message,
        }
    }
}

/// Either a complete analysis or a single kinded error, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisReport {
    Complete(Box<ProductAnalysis>),
    Failed(ErrorReport),
}

impl AnalysisReport {
    pub fn score(&self) -> Option<f64> {
        match self {
            AnalysisReport::Complete(analysis) => Some(analysis.assessment.score),
            AnalysisReport::Failed(_) => None,
        }
    }
}

impl From<Result<ProductAnalysis, CoreError>> for AnalysisReport {
    fn from(result: Result<ProductAnalysis, CoreError>) -> Self {
        match result {
            Ok(analysis) => AnalysisReport::Complete(Box::new(analysis)),
            Err(e) => AnalysisReport::Failed(ErrorReport::from(e)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComparedProduct {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductComparison {
    pub first: AnalysisReport,
    pub second: AnalysisReport,
    /// Higher health score; absent on a tie or when either side failed
    pub healthier: Option<ComparedProduct>,
}

impl ProductComparison {
    pub fn new(first: AnalysisReport, second: AnalysisReport) -> Self {
        let healthier = match (first.score(), second.score()) {
            (Some(a), Some(b)) if a > b => Some(ComparedProduct::First),
            (Some(a), Some(b)) if b > a => Some(ComparedProduct::Second),
            _ => None,
        };

        Self {
            first,
            second,
            healthier,
        }
    }
}
