use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::processing::entities::ProcessingTier;

pub const SUGARS_KEY: &str = "sugars_100g";
pub const SATURATED_FAT_KEY: &str = "saturated-fat_100g";
pub const SALT_KEY: &str = "salt_100g";
pub const FIBER_KEY: &str = "fiber_100g";
pub const PROTEINS_KEY: &str = "proteins_100g";

/// Nutrient quantities per 100g, keyed the way Open Food Facts names them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Nutrients(BTreeMap<String, f64>);

impl Nutrients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Missing, negative or non-finite values read as zero
    pub fn get(&self, key: &str) -> f64 {
        match self.0.get(key) {
            Some(value) if value.is_finite() && *value > 0.0 => *value,
            _ => 0.0,
        }
    }

    pub fn sugars(&self) -> f64 {
        self.get(SUGARS_KEY)
    }

    pub fn saturated_fat(&self) -> f64 {
        self.get(SATURATED_FAT_KEY)
    }

    pub fn salt(&self) -> f64 {
        self.get(SALT_KEY)
    }

    pub fn fiber(&self) -> f64 {
        self.get(FIBER_KEY)
    }

    pub fn proteins(&self) -> f64 {
        self.get(PROTEINS_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Nutrients {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Snapshot of one product as returned by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRecord {
    pub name: String,
    pub brand: String,
    pub ingredients_text: String,
    pub ingredients_list: Vec<String>,
    pub nutrients: Nutrients,
    pub categories: Vec<String>,
    pub allergens: String,
    pub additives: Vec<String>,
    pub upstream_tier: Option<ProcessingTier>,
    pub fetched_at: DateTime<Utc>,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, ingredients_text: impl Into<String>) -> Self {
        let ingredients_text = ingredients_text.into();

        Self {
            name: name.into(),
            brand: String::new(),
            ingredients_list: split_ingredients(&ingredients_text),
            ingredients_text,
            nutrients: Nutrients::default(),
            categories: Vec::new(),
            allergens: String::new(),
            additives: Vec::new(),
            upstream_tier: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories
            .first()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
    }
}

/// Splits raw ingredient text on commas, dropping empty fragments
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split(',')
        .map(|part| part.trim().trim_end_matches('.').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Candidate returned by a category search, before ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub nutrients: Nutrients,
    pub upstream_tier: Option<ProcessingTier>,
}

/// Product fields surfaced to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub name: String,
    pub brand: String,
    pub ingredients_text: String,
    pub categories: Vec<String>,
    pub allergens: String,
}

impl From<&ProductRecord> for ProductSummary {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            brand: record.brand.clone(),
            ingredients_text: record.ingredients_text.clone(),
            categories: record.categories.clone(),
            allergens: record.allergens.clone(),
        }
    }
}
