//! Dataset tooling: product-catalog validation and ground-truth building.

pub mod products;
pub mod queries;

pub use products::{validate_products, ProductValidationOptions, ProductValidationStats};
pub use queries::{build_ground_truth, GroundTruthFilter};
