use crate::domain::{
    common::round_to,
    health_score::entities::{
        HealthAssessment, Interpretation, NutrientBreakdown, NutrientLevel, NutrientLevels,
    },
    processing::entities::ProcessingTier,
    product::entities::Nutrients,
};

const UNKNOWN_TIER_BASE: f64 = 50.0;

const SUGAR_WEIGHT: f64 = 1.5;
const SUGAR_MAX_PENALTY: f64 = 30.0;
const SATURATED_FAT_WEIGHT: f64 = 2.0;
const SATURATED_FAT_MAX_PENALTY: f64 = 25.0;
const SALT_WEIGHT: f64 = 10.0;
const SALT_MAX_PENALTY: f64 = 20.0;
const FIBER_WEIGHT: f64 = 2.0;
const FIBER_MAX_BONUS: f64 = 15.0;
const PROTEIN_WEIGHT: f64 = 0.5;
const PROTEIN_MAX_BONUS: f64 = 10.0;

pub fn base_score(tier: Option<ProcessingTier>) -> f64 {
    match tier {
        Some(ProcessingTier::Unprocessed) => 90.0,
        Some(ProcessingTier::CulinaryIngredient) => 75.0,
        Some(ProcessingTier::Processed) => 60.0,
        Some(ProcessingTier::UltraProcessed) => 30.0,
        None => UNKNOWN_TIER_BASE,
    }
}

fn capped(value: f64, weight: f64, cap: f64) -> f64 {
    (value * weight).min(cap)
}

pub fn sugar_level(sugar: f64) -> NutrientLevel {
    if sugar >= 22.0 {
        NutrientLevel::High
    } else if sugar >= 10.0 {
        NutrientLevel::Moderate
    } else {
        NutrientLevel::Low
    }
}

pub fn salt_level(salt: f64) -> NutrientLevel {
    if salt >= 1.5 {
        NutrientLevel::High
    } else if salt >= 0.3 {
        NutrientLevel::Moderate
    } else {
        NutrientLevel::Low
    }
}

/// Scores a product from its tier and per-100g nutrients.
///
/// A missing tier scores from a neutral base of 50.
pub fn assess_health(nutrients: &Nutrients, tier: Option<ProcessingTier>) -> HealthAssessment {
    let sugar = nutrients.sugars();
    let saturated_fat = nutrients.saturated_fat();
    let salt = nutrients.salt();
    let fiber = nutrients.fiber();
    let protein = nutrients.proteins();

    let sugar_penalty = capped(sugar, SUGAR_WEIGHT, SUGAR_MAX_PENALTY);
    let saturated_fat_penalty = capped(saturated_fat, SATURATED_FAT_WEIGHT, SATURATED_FAT_MAX_PENALTY);
    let salt_penalty = capped(salt, SALT_WEIGHT, SALT_MAX_PENALTY);
    let fiber_bonus = capped(fiber, FIBER_WEIGHT, FIBER_MAX_BONUS);
    let protein_bonus = capped(protein, PROTEIN_WEIGHT, PROTEIN_MAX_BONUS);

    let raw = base_score(tier) - sugar_penalty - saturated_fat_penalty - salt_penalty
        + fiber_bonus
        + protein_bonus;
    let score = round_to(raw.clamp(0.0, 100.0), 1);
    let interpretation = Interpretation::from_score(score);

    tracing::debug!(
        score,
        sugar_penalty,
        saturated_fat_penalty,
        salt_penalty,
        fiber_bonus,
        protein_bonus,
        "health score computed"
    );

    HealthAssessment {
        score,
        interpretation,
        summary: interpretation.description().to_string(),
        breakdown: NutrientBreakdown {
            sugar: round_to(sugar, 1),
            saturated_fat: round_to(saturated_fat, 1),
            salt: round_to(salt, 2),
            fiber: round_to(fiber, 1),
            protein: round_to(protein, 1),
        },
        nutrient_levels: NutrientLevels {
            sugar: sugar_level(sugar),
            salt: salt_level(salt),
        },
    }
}
