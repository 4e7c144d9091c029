use std::future::Future;

use crate::domain::{
    analysis::{
        entities::{ProductAnalysis, ProductComparison},
        value_objects::{AnalyzeProductInput, CompareProductsInput},
    },
    common::entities::app_errors::CoreError,
};

/// Service trait for the fetch, classify, score and rank pipeline
#[cfg_attr(test, mockall::automock)]
pub trait ProductAnalysisService: Send + Sync {
    fn analyze_product(
        &self,
        input: AnalyzeProductInput,
    ) -> impl Future<Output = Result<ProductAnalysis, CoreError>> + Send;

    /// Runs two independent pipelines concurrently
    fn compare_products(
        &self,
        input: CompareProductsInput,
    ) -> impl Future<Output = ProductComparison> + Send;
}
