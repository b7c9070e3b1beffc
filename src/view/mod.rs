//! Dynamic views: ordered runtime interactions between model elements.
//!
//! ```text
//! DynamicView::add(source, destination, description?, technology?)
//!   ├── ScopeValidator::check(source)          may the element appear here?
//!   ├── ScopeValidator::check(destination)
//!   ├── RelationshipResolver::resolve(...)     which declared relationship?
//!   ├── SequenceTracker::next()                which order label?
//!   └── record the interaction                 only after everything passed
//! ```

mod config;
mod dynamic;
mod error;
mod resolver;
mod scope;
mod sequence;

pub use config::ViewConfig;
pub use dynamic::{ChildSequence, DynamicView, Interaction, InteractionRecord, ParallelSequence};
pub use error::{DynamicViewError, NotAddableReason};
pub use resolver::{RelationshipResolver, ResolvedRelationship};
pub use scope::{ScopeValidator, ViewScope};
pub use sequence::{FrameKind, SequenceError, SequenceTracker};
