use crate::domain::{
    alternatives::{
        entities::{AlternativeCandidate, AlternativeSuggestions},
        ports::AlternativeService,
        value_objects::FindAlternativesInput,
    },
    common::services::Service,
    product::{
        entities::CandidateRecord,
        ports::{CandidateSource, ProductLookup},
    },
};

/// Candidates requested per alternative returned, leaving room for filtering
const CANDIDATE_OVERFETCH: usize = 3;

/// Turns a category tag such as `en:breakfast_cereals` into a search phrase
pub fn normalize_category(tag: &str) -> String {
    let name = tag.rsplit_once(':').map_or(tag, |(_, name)| name);
    name.replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ranks candidates healthiest first and keeps at most `limit`.
///
/// Nameless candidates and the product itself (`exclude_name`, compared
/// case-insensitively) are dropped. Ties keep their source order.
pub fn rank_candidates(
    candidates: Vec<CandidateRecord>,
    limit: usize,
    exclude_name: Option<&str>,
) -> Vec<AlternativeCandidate> {
    let excluded = exclude_name
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty());

    let mut ranked: Vec<AlternativeCandidate> = candidates
        .into_iter()
        .filter_map(AlternativeCandidate::from_record)
        .filter(|candidate| {
            excluded
                .as_deref()
                .is_none_or(|name| candidate.name.to_lowercase() != name)
        })
        .collect();

    ranked.sort_by(|a, b| a.composite_score.total_cmp(&b.composite_score));
    ranked.truncate(limit);
    ranked
}

impl<L, S> AlternativeService for Service<L, S>
where
    L: ProductLookup,
    S: CandidateSource,
{
    async fn find_alternatives(&self, input: FindAlternativesInput) -> AlternativeSuggestions {
        let Some(category) = input
            .categories
            .first()
            .map(|tag| normalize_category(tag))
            .filter(|category| !category.is_empty())
        else {
            return AlternativeSuggestions::empty(
                "No category information available; alternatives cannot be searched.",
            );
        };

        if input.limit == 0 {
            return AlternativeSuggestions::empty("No alternatives requested.");
        }

        let candidates = match self
            .candidate_source
            .search_by_category(
                category.clone(),
                input.limit.saturating_mul(CANDIDATE_OVERFETCH),
            )
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Alternative search for category {:?} failed: {}", category, e);
                return AlternativeSuggestions::empty(
                    "Alternatives are temporarily unavailable.",
                );
            }
        };

        let alternatives = rank_candidates(candidates, input.limit, Some(&input.product_name));
        tracing::debug!(
            category = %category,
            found = alternatives.len(),
            "alternatives ranked"
        );

        if alternatives.is_empty() {
            return AlternativeSuggestions::empty(format!(
                "No alternatives found in category '{}'.",
                category
            ));
        }

        AlternativeSuggestions {
            alternatives,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{AnalysisConfig, entities::app_errors::CoreError},
        processing::entities::ProcessingTier,
        product::{
            entities::{Nutrients, SALT_KEY, SUGARS_KEY},
            ports::{MockCandidateSource, MockProductLookup},
        },
    };

    fn candidate(name: &str, sugar: f64, salt: f64, tier: Option<ProcessingTier>) -> CandidateRecord {
        CandidateRecord {
            name: Some(name.to_string()),
            brand: None,
            nutrients: Nutrients::new().with(SUGARS_KEY, sugar).with(SALT_KEY, salt),
            upstream_tier: tier,
        }
    }

    fn input(categories: &[&str], limit: usize) -> FindAlternativesInput {
        FindAlternativesInput {
            product_name: "Choco Flakes".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            limit,
        }
    }

    fn service(source: MockCandidateSource) -> Service<MockProductLookup, MockCandidateSource> {
        Service::new(MockProductLookup::new(), source, AnalysisConfig::default())
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("en:breakfast_cereals"), "breakfast cereals");
        assert_eq!(normalize_category("en:plant-based-foods"), "plant based foods");
        assert_eq!(normalize_category("snacks"), "snacks");
        assert_eq!(normalize_category("en:"), "");
    }

    #[test]
    fn test_healthier_candidate_ranks_first() {
        let ranked = rank_candidates(
            vec![
                candidate("Soda", 20.0, 1.5, Some(ProcessingTier::UltraProcessed)),
                candidate("Sparkling water", 2.0, 0.1, Some(ProcessingTier::Unprocessed)),
            ],
            3,
            None,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Sparkling water");
        assert_eq!(ranked[1].name, "Soda");
    }

    #[test]
    fn test_rank_respects_limit_and_exclusions() {
        let mut nameless = candidate("x", 0.0, 0.0, Some(ProcessingTier::Unprocessed));
        nameless.name = None;
        let ranked = rank_candidates(
            vec![
                nameless,
                candidate("choco flakes", 0.0, 0.0, Some(ProcessingTier::Unprocessed)),
                candidate("Bran", 4.0, 0.2, Some(ProcessingTier::Processed)),
                candidate("Muesli", 8.0, 0.1, Some(ProcessingTier::Processed)),
                candidate("Puffs", 30.0, 0.9, None),
            ],
            2,
            Some("Choco Flakes"),
        );
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bran", "Muesli"]);
    }

    #[tokio::test]
    async fn test_empty_categories_give_message() {
        let mut source = MockCandidateSource::new();
        source.expect_search_by_category().never();

        let suggestions = service(source).find_alternatives(input(&[], 3)).await;
        assert!(suggestions.alternatives.is_empty());
        assert!(suggestions.message.is_some());
    }

    #[tokio::test]
    async fn test_queries_three_times_the_limit() {
        let mut source = MockCandidateSource::new();
        source
            .expect_search_by_category()
            .withf(|category, count| category == "breakfast cereals" && *count == 6)
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(vec![
                        candidate("Frosted", 35.0, 0.7, Some(ProcessingTier::UltraProcessed)),
                        candidate("Oat flakes", 1.2, 0.01, Some(ProcessingTier::Unprocessed)),
                        candidate("Granola", 18.0, 0.3, Some(ProcessingTier::Processed)),
                    ])
                })
            });

        let suggestions = service(source)
            .find_alternatives(input(&["en:breakfast_cereals"], 2))
            .await;
        assert_eq!(suggestions.message, None);
        let names: Vec<&str> = suggestions
            .alternatives
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Oat flakes", "Granola"]);
    }

    #[tokio::test]
    async fn test_huge_limit_saturates_candidate_count() {
        let mut source = MockCandidateSource::new();
        source
            .expect_search_by_category()
            .withf(|_, count| *count == usize::MAX)
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(vec![candidate("Oat flakes", 1.2, 0.01, Some(ProcessingTier::Unprocessed))])
                })
            });

        let suggestions = service(source)
            .find_alternatives(input(&["en:breakfast_cereals"], usize::MAX))
            .await;
        assert_eq!(suggestions.alternatives.len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_empty_list() {
        let mut source = MockCandidateSource::new();
        source.expect_search_by_category().returning(|_, _| {
            Box::pin(async { Err(CoreError::UpstreamUnavailable("timeout".to_string())) })
        });

        let suggestions = service(source)
            .find_alternatives(input(&["en:sodas"], 3))
            .await;
        assert!(suggestions.alternatives.is_empty());
        assert_eq!(
            suggestions.message.as_deref(),
            Some("Alternatives are temporarily unavailable.")
        );
    }
}
