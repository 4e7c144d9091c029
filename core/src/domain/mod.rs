pub mod alternatives;
pub mod analysis;
pub mod common;
pub mod health_score;
pub mod processing;
pub mod product;
