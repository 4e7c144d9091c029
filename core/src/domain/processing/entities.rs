use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{RefOr, schema::Schema},
};

/// Degree of industrial processing, 1 = least processed, 4 = ultra-processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProcessingTier {
    Unprocessed = 1,
    CulinaryIngredient = 2,
    Processed = 3,
    UltraProcessed = 4,
}

impl ProcessingTier {
    pub const ALL: [ProcessingTier; 4] = [
        ProcessingTier::Unprocessed,
        ProcessingTier::CulinaryIngredient,
        ProcessingTier::Processed,
        ProcessingTier::UltraProcessed,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ProcessingTier::Unprocessed => "Unprocessed or Minimally Processed Foods",
            ProcessingTier::CulinaryIngredient => "Processed Culinary Ingredients",
            ProcessingTier::Processed => "Processed Foods",
            ProcessingTier::UltraProcessed => "Ultra-Processed Foods",
        }
    }

    pub fn is_minimally_processed(self) -> bool {
        self <= ProcessingTier::CulinaryIngredient
    }
}

impl From<ProcessingTier> for u8 {
    fn from(tier: ProcessingTier) -> Self {
        tier.value()
    }
}

impl TryFrom<u8> for ProcessingTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProcessingTier::Unprocessed),
            2 => Ok(ProcessingTier::CulinaryIngredient),
            3 => Ok(ProcessingTier::Processed),
            4 => Ok(ProcessingTier::UltraProcessed),
            other => Err(format!("processing tier must be between 1 and 4, got {other}")),
        }
    }
}

impl fmt::Display for ProcessingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOVA {}", self.value())
    }
}

impl PartialSchema for ProcessingTier {
    fn schema() -> RefOr<Schema> {
        u8::schema()
    }
}

impl ToSchema for ProcessingTier {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("ProcessingTier")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub tier: ProcessingTier,
    pub tier_name: String,
    pub reasoning: String,
    /// Matched markers in order of first appearance, at most five
    pub key_indicators: Vec<String>,
    /// Comma-based estimate, not a parsed ingredient count
    pub ingredient_count: usize,
    pub additive_count: usize,
}
