use std::future::Future;

use crate::domain::alternatives::{
    entities::AlternativeSuggestions, value_objects::FindAlternativesInput,
};

/// Service trait for suggesting healthier products in the same category
#[cfg_attr(test, mockall::automock)]
pub trait AlternativeService: Send + Sync {
    /// Never fails: upstream problems degrade to an empty list with a message
    fn find_alternatives(
        &self,
        input: FindAlternativesInput,
    ) -> impl Future<Output = AlternativeSuggestions> + Send;
}
