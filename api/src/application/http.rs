pub mod health;
pub mod health_score;
pub mod processing;
pub mod product;
pub mod server;
