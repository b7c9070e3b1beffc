//! The architecture model a dynamic view is drawn from.
//!
//! Elements (people, software systems, containers, components and deployment
//! elements) and the relationships declared between them. The dynamic view
//! core only reads from it, through the [`ModelIndex`] trait.

mod element;
mod index;
mod relationship;
mod store;
pub mod views;

pub use element::{Element, ElementKind, StructuralKind};
pub use index::ModelIndex;
pub use relationship::Relationship;
pub use store::{Model, ModelError};
pub use views::ElementView;
