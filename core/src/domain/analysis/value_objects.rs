use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::processing::entities::ProcessingTier;

/// When the pipeline looks for healthier alternatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AlternativesPolicy {
    Never,
    /// Skip products that are already unprocessed or culinary ingredients
    #[default]
    WhenProcessed,
    Always,
}

impl AlternativesPolicy {
    pub fn should_rank(self, tier: ProcessingTier) -> bool {
        match self {
            AlternativesPolicy::Never => false,
            AlternativesPolicy::WhenProcessed => !tier.is_minimally_processed(),
            AlternativesPolicy::Always => true,
        }
    }
}

impl FromStr for AlternativesPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(AlternativesPolicy::Never),
            "when-processed" | "when_processed" => Ok(AlternativesPolicy::WhenProcessed),
            "always" => Ok(AlternativesPolicy::Always),
            other => Err(format!(
                "unknown alternatives policy '{other}', expected never, when-processed or always"
            )),
        }
    }
}

impl fmt::Display for AlternativesPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AlternativesPolicy::Never => "never",
            AlternativesPolicy::WhenProcessed => "when-processed",
            AlternativesPolicy::Always => "always",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeProductInput {
    pub query: String,
    pub include_alternatives: bool,
    /// Overrides the configured policy for this request
    pub alternatives_policy: Option<AlternativesPolicy>,
    pub max_alternatives: Option<usize>,
}

impl AnalyzeProductInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            include_alternatives: true,
            alternatives_policy: None,
            max_alternatives: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareProductsInput {
    pub first: AnalyzeProductInput,
    pub second: AnalyzeProductInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("never".parse(), Ok(AlternativesPolicy::Never));
        assert_eq!("When-Processed".parse(), Ok(AlternativesPolicy::WhenProcessed));
        assert_eq!("always".parse(), Ok(AlternativesPolicy::Always));
        assert!("sometimes".parse::<AlternativesPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [
            AlternativesPolicy::Never,
            AlternativesPolicy::WhenProcessed,
            AlternativesPolicy::Always,
        ] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }

    #[test]
    fn test_when_processed_skips_whole_foods() {
        let policy = AlternativesPolicy::WhenProcessed;
        assert!(!policy.should_rank(ProcessingTier::Unprocessed));
        assert!(!policy.should_rank(ProcessingTier::CulinaryIngredient));
        assert!(policy.should_rank(ProcessingTier::Processed));
        assert!(policy.should_rank(ProcessingTier::UltraProcessed));
        assert!(AlternativesPolicy::Always.should_rank(ProcessingTier::Unprocessed));
        assert!(!AlternativesPolicy::Never.should_rank(ProcessingTier::UltraProcessed));
    }
}
