pub mod entities;
pub mod markers;
pub mod services;

pub use entities::*;
pub use services::classify_processing;
