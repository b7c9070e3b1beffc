//! # c4-dynamic
//!
//! Dynamic views for C4 software architecture models: ordered, numbered
//! runtime interactions between people, software systems, containers and
//! components.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → JSON/YAML reading and writing of views (feature "interchange")
//!   ↓
//! view        → DynamicView, scope rules, relationship resolution, numbering
//!   ↓
//! model       → Elements, relationships, ModelIndex read interface
//!   ↓
//! base        → Primitives (ElementId, RelationshipId, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → view → interchange)
// ============================================================================

/// Foundation types: IDs and constants
pub mod base;

/// Static model: elements, relationships, lookup
pub mod model;

/// Dynamic views over a model
pub mod view;

/// View interchange formats: JSON, YAML
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{ElementId, RelationshipId};

// Re-export the main entry points
pub use model::{Element, ElementKind, Model, ModelIndex, Relationship};
pub use view::{DynamicView, DynamicViewError, ViewConfig, ViewScope};
