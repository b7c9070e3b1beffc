//! Dynamic view tests
//!
//! End-to-end behaviour of `DynamicView` over fixture models:
//! - Scope rules
//! - Relationship resolution and responses
//! - Order labels, parallel and child sequences

pub mod tests_dynamic_view;
pub mod tests_resolution;
pub mod tests_sequencing;
