//! Normalizes Open Food Facts search results into domain records.
//!
//! The API is loosely typed: numbers may arrive as strings, `allergens` may
//! be a string or a list, `nova_group` may be a number or a string. Every
//! field is read as raw JSON here so the domain only sees fixed shapes.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    processing::entities::ProcessingTier,
    product::entities::{CandidateRecord, Nutrients, ProductRecord, split_ingredients},
};

/// Fields requested from the search endpoint
pub const PRODUCT_FIELDS: &str = "product_name,brands,ingredients_text,ingredients,nutriments,\
categories_tags,allergens,allergens_tags,additives_tags,nova_group";

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: Value,
    /// Absent or `null` when the search has no hits
    #[serde(default)]
    pub products: Option<Vec<RawProduct>>,
}

impl SearchResponse {
    pub fn products(&self) -> &[RawProduct] {
        self.products.as_deref().unwrap_or_default()
    }

    /// Whether the upstream reported no hits at all
    pub fn is_empty(&self) -> bool {
        self.products().is_empty() || value_as_f64(&self.count) == Some(0.0)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub product_name: Value,
    #[serde(default)]
    pub brands: Value,
    #[serde(default)]
    pub ingredients_text: Value,
    #[serde(default)]
    pub ingredients: Value,
    #[serde(default)]
    pub nutriments: Value,
    #[serde(default)]
    pub categories_tags: Value,
    #[serde(default)]
    pub allergens: Value,
    #[serde(default)]
    pub allergens_tags: Value,
    #[serde(default)]
    pub additives_tags: Value,
    #[serde(default)]
    pub nova_group: Value,
}

pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_as_string).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

pub fn value_as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_as_string).collect(),
        Value::String(s) => split_ingredients(s),
        _ => Vec::new(),
    }
}

/// Out-of-range or fractional groups are dropped rather than guessed
pub fn value_as_tier(value: &Value) -> Option<ProcessingTier> {
    let group = value_as_f64(value)?;
    if group.fract() != 0.0 || !(1.0..=4.0).contains(&group) {
        return None;
    }
    ProcessingTier::try_from(group as u8).ok()
}

pub fn value_as_nutrients(value: &Value) -> Nutrients {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, v)| value_as_f64(v).map(|v| (key.clone(), v)))
            .collect(),
        _ => Nutrients::default(),
    }
}

/// Prefers the structured ingredient list, falling back to splitting the text
fn ingredients_list(raw: &RawProduct, ingredients_text: &str) -> Vec<String> {
    let structured: Vec<String> = match &raw.ingredients {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => map.get("text").and_then(value_as_string),
                other => value_as_string(other),
            })
            .collect(),
        _ => Vec::new(),
    };

    if structured.is_empty() {
        split_ingredients(ingredients_text)
    } else {
        structured
    }
}

impl From<&RawProduct> for ProductRecord {
    fn from(raw: &RawProduct) -> Self {
        let ingredients_text = value_as_string(&raw.ingredients_text).unwrap_or_default();
        let allergens = value_as_string(&raw.allergens)
            .or_else(|| value_as_string(&raw.allergens_tags))
            .unwrap_or_default();

        Self {
            name: value_as_string(&raw.product_name).unwrap_or_default(),
            brand: value_as_string(&raw.brands).unwrap_or_default(),
            ingredients_list: ingredients_list(raw, &ingredients_text),
            ingredients_text,
            nutrients: value_as_nutrients(&raw.nutriments),
            categories: value_as_string_list(&raw.categories_tags),
            allergens,
            additives: value_as_string_list(&raw.additives_tags),
            upstream_tier: value_as_tier(&raw.nova_group),
            fetched_at: Utc::now(),
        }
    }
}

impl From<RawProduct> for ProductRecord {
    fn from(raw: RawProduct) -> Self {
        Self::from(&raw)
    }
}

impl From<&RawProduct> for CandidateRecord {
    fn from(raw: &RawProduct) -> Self {
        Self {
            name: value_as_string(&raw.product_name),
            brand: value_as_string(&raw.brands),
            nutrients: value_as_nutrients(&raw.nutriments),
            upstream_tier: value_as_tier(&raw.nova_group),
        }
    }
}

impl From<RawProduct> for CandidateRecord {
    fn from(raw: RawProduct) -> Self {
        Self::from(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_product_record_from_typical_response() {
        let record = ProductRecord::from(raw(json!({
            "product_name": "Nutty Spread",
            "brands": "Acme",
            "ingredients_text": "Sugar, palm oil, hazelnuts 13%, skimmed milk powder, cocoa, emulsifier: lecithins",
            "nutriments": {
                "sugars_100g": 56.3,
                "saturated-fat_100g": "10.6",
                "salt_100g": 0.107,
                "sugars_unit": "g"
            },
            "categories_tags": ["en:spreads", "en:sweet-spreads"],
            "allergens": "en:milk,en:nuts",
            "additives_tags": ["en:e322"],
            "nova_group": 4
        })));

        assert_eq!(record.name, "Nutty Spread");
        assert_eq!(record.brand, "Acme");
        assert_eq!(record.ingredients_list.len(), 6);
        assert_eq!(record.nutrients.sugars(), 56.3);
        assert_eq!(record.nutrients.saturated_fat(), 10.6);
        assert_eq!(record.nutrients.get("sugars_unit"), 0.0);
        assert_eq!(record.primary_category(), Some("en:spreads"));
        assert_eq!(record.allergens, "en:milk,en:nuts");
        assert_eq!(record.additives, vec!["en:e322"]);
        assert_eq!(record.upstream_tier, Some(ProcessingTier::UltraProcessed));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = ProductRecord::from(raw(json!({})));
        assert_eq!(record.name, "");
        assert_eq!(record.ingredients_text, "");
        assert!(record.ingredients_list.is_empty());
        assert!(record.nutrients.is_empty());
        assert!(record.categories.is_empty());
        assert_eq!(record.upstream_tier, None);
    }

    #[test]
    fn test_loosely_typed_fields_are_normalized() {
        let record = ProductRecord::from(raw(json!({
            "product_name": null,
            "allergens": "",
            "allergens_tags": ["en:gluten", "en:soybeans"],
            "nova_group": "3",
            "ingredients": [{"text": "wheat flour"}, {"text": "water"}],
            "ingredients_text": "wheat flour, water, vitamins (B1, B2)"
        })));

        assert_eq!(record.name, "");
        assert_eq!(record.allergens, "en:gluten, en:soybeans");
        assert_eq!(record.upstream_tier, Some(ProcessingTier::Processed));
        assert_eq!(record.ingredients_list, vec!["wheat flour", "water"]);
    }

    #[test]
    fn test_invalid_nova_group_is_dropped() {
        assert_eq!(value_as_tier(&json!(0)), None);
        assert_eq!(value_as_tier(&json!(7)), None);
        assert_eq!(value_as_tier(&json!(2.5)), None);
        assert_eq!(value_as_tier(&json!("unknown")), None);
        assert_eq!(value_as_tier(&json!(1)), Some(ProcessingTier::Unprocessed));
    }

    #[test]
    fn test_decimal_comma_is_accepted() {
        assert_eq!(value_as_f64(&json!("1,5")), Some(1.5));
        assert_eq!(value_as_f64(&json!("n/a")), None);
    }

    #[test]
    fn test_candidate_without_name() {
        let candidate = CandidateRecord::from(raw(json!({
            "brands": "Acme",
            "nutriments": {"sugars_100g": 4}
        })));
        assert_eq!(candidate.name, None);
        assert_eq!(candidate.brand.as_deref(), Some("Acme"));
        assert_eq!(candidate.nutrients.sugars(), 4.0);
    }

    #[test]
    fn test_empty_search_response() {
        let response: SearchResponse =
            serde_json::from_value(json!({"count": "0", "products": []})).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_null_products_is_an_empty_search() {
        let response: SearchResponse =
            serde_json::from_value(json!({"count": 0, "products": null})).unwrap();
        assert!(response.products().is_empty());
        assert!(response.is_empty());

        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.is_empty());
    }
}
