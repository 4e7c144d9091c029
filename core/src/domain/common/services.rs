use std::sync::Arc;

use crate::domain::{
    common::AnalysisConfig,
    product::ports::{CandidateSource, ProductLookup},
};

/// Application service wiring the domain to its collaborators
#[derive(Debug)]
pub struct Service<L, S>
where
    L: ProductLookup,
    S: CandidateSource,
{
    pub(crate) product_lookup: Arc<L>,
    pub(crate) candidate_source: Arc<S>,
    pub(crate) analysis_config: AnalysisConfig,
}

impl<L, S> Service<L, S>
where
    L: ProductLookup,
    S: CandidateSource,
{
    pub fn new(product_lookup: L, candidate_source: S, analysis_config: AnalysisConfig) -> Self {
        Self {
            product_lookup: Arc::new(product_lookup),
            candidate_source: Arc::new(candidate_source),
            analysis_config,
        }
    }
}

impl<L, S> Clone for Service<L, S>
where
    L: ProductLookup,
    S: CandidateSource,
{
    fn clone(&self) -> Self {
        Self {
            product_lookup: Arc::clone(&self.product_lookup),
            candidate_source: Arc::clone(&self.candidate_source),
            analysis_config: self.analysis_config.clone(),
        }
    }
}
