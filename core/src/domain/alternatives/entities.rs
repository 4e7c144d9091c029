use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::round_to,
    processing::entities::ProcessingTier,
    product::entities::CandidateRecord,
};

/// Tier assumed for candidates the source did not classify
pub const DEFAULT_CANDIDATE_TIER: ProcessingTier = ProcessingTier::UltraProcessed;

const LOW_SUGAR_PER_100G: f64 = 5.0;
const LOW_SALT_PER_100G: f64 = 0.5;
const FALLBACK_REASON: &str = "healthier nutritional profile";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlternativeCandidate {
    pub name: String,
    pub brand: String,
    pub tier: ProcessingTier,
    pub sugar_per_100g: f64,
    pub salt_per_100g: f64,
    pub reason: String,
    /// Ordering key only, lower is healthier
    #[serde(skip)]
    pub(crate) composite_score: f64,
}

impl AlternativeCandidate {
    /// Returns `None` for candidates without a usable name
    pub fn from_record(record: CandidateRecord) -> Option<Self> {
        let name = record.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;
        let tier = record.upstream_tier.unwrap_or(DEFAULT_CANDIDATE_TIER);
        let sugar = record.nutrients.sugars();
        let salt = record.nutrients.salt();

        Some(Self {
            name,
            brand: record.brand.unwrap_or_default().trim().to_string(),
            tier,
            sugar_per_100g: round_to(sugar, 1),
            salt_per_100g: round_to(salt, 2),
            reason: build_reason(tier, sugar, salt),
            composite_score: composite_score(tier, sugar, salt),
        })
    }

    pub fn composite_score(&self) -> f64 {
        self.composite_score
    }
}

pub fn composite_score(tier: ProcessingTier, sugar: f64, salt: f64) -> f64 {
    sugar + salt + f64::from(tier.value()) * 10.0
}

fn build_reason(tier: ProcessingTier, sugar: f64, salt: f64) -> String {
    let mut reasons = Vec::new();
    if tier.is_minimally_processed() {
        reasons.push(format!("minimally processed ({})", tier));
    }
    if sugar < LOW_SUGAR_PER_100G {
        reasons.push(format!("low sugar ({:.1} g/100g)", sugar));
    }
    if salt < LOW_SALT_PER_100G {
        reasons.push(format!("low salt ({:.2} g/100g)", salt));
    }

    if reasons.is_empty() {
        FALLBACK_REASON.to_string()
    } else {
        reasons.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlternativeSuggestions {
    pub alternatives: Vec<AlternativeCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AlternativeSuggestions {
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            alternatives: Vec::new(),
            message: Some(message.into()),
        }
    }
}
