pub mod analyze_product;
pub mod compare_products;
