//! Foundation types for the dynamic view core.
//!
//! This module provides the primitives shared by every other layer:
//! - [`ElementId`] - Identity of a model element
//! - [`RelationshipId`] - Identity of a declared relationship
//! - Domain constants (nesting depth)
//!
//! This module has NO dependencies on other c4dyn modules.

pub mod constants;
mod id;

pub use id::{ElementId, RelationshipId};
