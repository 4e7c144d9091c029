pub mod client;
pub mod mappers;

pub use client::OpenFoodFactsClient;
