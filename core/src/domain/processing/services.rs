use crate::domain::{
    processing::{
        entities::{ClassificationResult, ProcessingTier},
        markers::{
            COSMETIC_MARKERS, CULINARY_MARKERS, INDUSTRIAL_MARKERS, distinct_labels, find_markers,
        },
    },
    product::entities::split_ingredients,
};

pub const MAX_KEY_INDICATORS: usize = 5;

/// Estimated ingredient count at which a product is always ultra-processed
const ULTRA_PROCESSED_MIN_INGREDIENTS: usize = 5;
/// Cosmetic additives only decide the tier for products this simple
const COSMETIC_MAX_INGREDIENTS: usize = 3;
const PROCESSED_MIN_INGREDIENTS: usize = 2;
const CULINARY_MAX_INGREDIENTS: usize = 2;
/// Longest single ingredient still read as one culinary ingredient ("extra virgin olive oil")
const CULINARY_MAX_WORDS: usize = 4;

/// Estimates the ingredient count from commas.
///
/// This is an approximation: an ingredient with internal commas such as
/// "vitamins (B1, B2, B6)" counts as several ingredients. Whitespace-only
/// text counts as empty and yields 0.
pub fn estimate_ingredient_count(ingredients_text: &str) -> usize {
    let text = ingredients_text.to_lowercase();
    if text.trim().is_empty() {
        return 0;
    }
    text.matches(',').count() + 1
}

/// Classifies a product's degree of processing from its ingredient text.
///
/// Rules are evaluated in order and the first match wins. The upstream hint
/// only takes part in the ultra-processed rule; any other disagreement is
/// reported in the reasoning while the computed tier is kept.
pub fn classify_processing(
    ingredients_text: &str,
    additive_tags: &[String],
    upstream_hint: Option<ProcessingTier>,
) -> ClassificationResult {
    let text = ingredients_text.to_lowercase();
    let ingredient_count = estimate_ingredient_count(&text);
    let additive_count = additive_tags.len();

    let industrial = find_markers(&text, INDUSTRIAL_MARKERS.iter());
    let cosmetic = find_markers(&text, COSMETIC_MARKERS.iter());

    let (tier, mut reasons, indicators) = if upstream_hint == Some(ProcessingTier::UltraProcessed)
        || !industrial.is_empty()
        || ingredient_count >= ULTRA_PROCESSED_MIN_INGREDIENTS
    {
        let mut matches = industrial;
        matches.extend(cosmetic);
        let labels = distinct_labels(matches);

        let mut reasons = Vec::new();
        if upstream_hint == Some(ProcessingTier::UltraProcessed) {
            reasons.push("The product database reports this product as ultra-processed.".to_string());
        }
        if !labels.is_empty() {
            reasons.push(format!(
                "Contains industrial ingredients or additives: {}.",
                labels.join(", ")
            ));
        }
        if ingredient_count >= ULTRA_PROCESSED_MIN_INGREDIENTS {
            reasons.push(format!(
                "Has an estimated {} ingredients, typical of industrial formulations.",
                ingredient_count
            ));
        }
        (ProcessingTier::UltraProcessed, reasons, labels)
    } else if !cosmetic.is_empty() && ingredient_count <= COSMETIC_MAX_INGREDIENTS {
        let labels = distinct_labels(cosmetic);
        let reason = format!(
            "Simple product ({} ingredients) with cosmetic additives: {}.",
            ingredient_count,
            labels.join(", ")
        );
        (ProcessingTier::UltraProcessed, vec![reason], labels)
    } else {
        let culinary = distinct_labels(find_markers(&text, CULINARY_MARKERS.iter()));

        if ingredient_count >= PROCESSED_MIN_INGREDIENTS && !culinary.is_empty() {
            let reason = format!(
                "Has an estimated {} ingredients including culinary ingredients: {}.",
                ingredient_count,
                culinary.join(", ")
            );
            (ProcessingTier::Processed, vec![reason], culinary)
        } else if ingredient_count <= CULINARY_MAX_INGREDIENTS
            && let Some(marker) = single_culinary_ingredient(&text)
        {
            let reason = format!("Consists of a single culinary ingredient: {}.", marker);
            (ProcessingTier::CulinaryIngredient, vec![reason], vec![marker])
        } else if ingredient_count == 0 {
            let reason =
                "No ingredient list available; treated as unprocessed or minimally processed."
                    .to_string();
            (ProcessingTier::Unprocessed, vec![reason], Vec::new())
        } else {
            let reason = format!(
                "No processing markers found in an estimated {} ingredient(s).",
                ingredient_count
            );
            (ProcessingTier::Unprocessed, vec![reason], Vec::new())
        }
    };

    if additive_count > 0 && tier != ProcessingTier::UltraProcessed {
        reasons.push(format!("{} additive tag(s) reported.", additive_count));
    }

    if let Some(hint) = upstream_hint
        && hint != tier
    {
        reasons.push(format!(
            "The product database reports NOVA group {}; the computed tier {} is kept.",
            hint.value(),
            tier.value()
        ));
    }

    ClassificationResult {
        tier,
        tier_name: tier.name().to_string(),
        reasoning: reasons.join(" "),
        key_indicators: indicators
            .into_iter()
            .take(MAX_KEY_INDICATORS)
            .map(str::to_string)
            .collect(),
        ingredient_count,
        additive_count,
    }
}

/// Returns the culinary marker when the text is one ingredient whose last
/// word is that marker, such as "sea salt" or "olive oil"
fn single_culinary_ingredient(text: &str) -> Option<&'static str> {
    let ingredients = split_ingredients(text);
    let [ingredient] = ingredients.as_slice() else {
        return None;
    };

    let words: Vec<&str> = ingredient.split_whitespace().collect();
    if words.len() > CULINARY_MAX_WORDS {
        return None;
    }
    let last = words.last()?.trim_matches(|c: char| !c.is_alphanumeric());

    CULINARY_MARKERS
        .iter()
        .find(|marker| marker.is_match(last))
        .map(|marker| marker.label)
}
