use crate::domain::product::entities::ProductRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct FindAlternativesInput {
    pub product_name: String,
    pub categories: Vec<String>,
    pub limit: usize,
}

impl FindAlternativesInput {
    pub fn for_product(product: &ProductRecord, limit: usize) -> Self {
        Self {
            product_name: product.name.clone(),
            categories: product.categories.clone(),
            limit,
        }
    }
}
