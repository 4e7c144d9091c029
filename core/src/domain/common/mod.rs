use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

use crate::domain::analysis::value_objects::AlternativesPolicy;

pub mod entities;
pub mod services;

pub const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";

#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    pub open_food_facts: OpenFoodFactsConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Clone, Debug)]
pub struct OpenFoodFactsConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Total number of attempts per upstream call, including the first one
    pub max_retries: usize,
}

impl OpenFoodFactsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_FOOD_FACTS_URL.to_string(),
            user_agent: format!("foodlens/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 8,
            max_retries: 3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub alternatives_policy: AlternativesPolicy,
    pub max_alternatives: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alternatives_policy: AlternativesPolicy::WhenProcessed,
            max_alternatives: 3,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
