use crate::domain::{
    alternatives::{
        entities::AlternativeSuggestions, ports::AlternativeService,
        value_objects::FindAlternativesInput,
    },
    analysis::{
        entities::{AnalysisReport, ProductAnalysis, ProductComparison},
        ports::ProductAnalysisService,
        value_objects::{AlternativesPolicy, AnalyzeProductInput, CompareProductsInput},
    },
    common::{entities::app_errors::CoreError, services::Service},
    health_score::services::assess_health,
    processing::services::classify_processing,
    product::ports::{CandidateSource, ProductLookup},
};

impl<L, S> ProductAnalysisService for Service<L, S>
where
    L: ProductLookup,
    S: CandidateSource,
{
    async fn analyze_product(
        &self,
        input: AnalyzeProductInput,
    ) -> Result<ProductAnalysis, CoreError> {
        // 1. Validate query
        let query = input.query.trim();
        if query.is_empty() {
            return Err(CoreError::MalformedInput(
                "query must not be empty".to_string(),
            ));
        }

        // 2. Fetch product
        let product = self
            .product_lookup
            .lookup(query.to_string())
            .await?
            .ok_or_else(|| {
                tracing::info!("No product found for query {:?}", query);
                CoreError::NotFound
            })?;

        // 3. Classify processing
        let classification = classify_processing(
            &product.ingredients_text,
            &product.additives,
            product.upstream_tier,
        );

        // 4. Score
        let assessment = assess_health(&product.nutrients, Some(classification.tier));

        // 5. Rank alternatives
        let policy = input
            .alternatives_policy
            .unwrap_or(self.analysis_config.alternatives_policy);
        let limit = input
            .max_alternatives
            .unwrap_or(self.analysis_config.max_alternatives);

        let suggestions = if !input.include_alternatives {
            AlternativeSuggestions::default()
        } else if policy == AlternativesPolicy::Never {
            AlternativeSuggestions::empty("Alternative suggestions are disabled.")
        } else if !policy.should_rank(classification.tier) {
            AlternativeSuggestions::empty(
                "Product is already minimally processed; no alternatives suggested.",
            )
        } else {
            self.find_alternatives(FindAlternativesInput::for_product(&product, limit))
                .await
        };

        tracing::info!(
            query = %query,
            product = %product.name,
            tier = classification.tier.value(),
            score = assessment.score,
            alternatives = suggestions.alternatives.len(),
            "product analyzed"
        );

        Ok(ProductAnalysis::new(
            &product,
            classification,
            assessment,
            suggestions,
        ))
    }

    async fn compare_products(&self, input: CompareProductsInput) -> ProductComparison {
        let (first, second) = futures::join!(
            self.analyze_product(input.first),
            self.analyze_product(input.second)
        );

        ProductComparison::new(AnalysisReport::from(first), AnalysisReport::from(second))
    }
}
