use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    product::entities::{CandidateRecord, ProductRecord},
};

/// Looks up the single best matching product for a free-text query
#[cfg_attr(test, mockall::automock)]
pub trait ProductLookup: Send + Sync {
    /// `Ok(None)` when the source has no match; transport failures are errors
    fn lookup(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Option<ProductRecord>, CoreError>> + Send;
}

/// Lists products of a category, used as alternative candidates
#[cfg_attr(test, mockall::automock)]
pub trait CandidateSource: Send + Sync {
    fn search_by_category(
        &self,
        category: String,
        count: usize,
    ) -> impl Future<Output = Result<Vec<CandidateRecord>, CoreError>> + Send;
}
