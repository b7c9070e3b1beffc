//! Error types for dynamic view operations.

use std::sync::Arc;

use thiserror::Error;

use super::sequence::SequenceError;
use crate::base::ElementId;

/// Errors that can occur while building a dynamic view.
///
/// Every failure aborts the operation that raised it; the view is left as it
/// was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynamicViewError {
    /// Both a software system and a container were given as scope.
    #[error(
        "You cannot specify both software system '{software_system}' and container '{container}' as the scope of a dynamic view"
    )]
    InvalidScopeConfiguration {
        software_system: ElementId,
        container: ElementId,
    },

    /// The element cannot appear in this view.
    #[error("{name} cannot be added to this dynamic view: {reason}")]
    ElementNotAddable {
        element: ElementId,
        name: Arc<str>,
        reason: NotAddableReason,
    },

    /// No declared relationship backs the requested interaction.
    #[error(
        "A relationship between {source_name} and {destination_name}{} does not exist in model.",
        technology_clause(.technology.as_deref())
    )]
    RelationshipNotFound {
        source_name: Arc<str>,
        destination_name: Arc<str>,
        technology: Option<Arc<str>>,
    },

    /// Parallel or child sequences were closed out of order.
    #[error(transparent)]
    SequencingMisuse(#[from] SequenceError),

    /// The model does not contain an element with this ID.
    #[error("Element '{0}' does not exist in model.")]
    UnknownElement(ElementId),
}

fn technology_clause(technology: Option<&str>) -> String {
    technology
        .map(|technology| format!(" with technology '{technology}'"))
        .unwrap_or_default()
}

/// Why an element was rejected by the scope rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotAddableReason {
    #[error(
        "only people, software systems, containers and components can be added to dynamic views, not a {kind}"
    )]
    NotStructural { kind: &'static str },

    #[error("it is already the scope of this view")]
    IsScope,

    #[error("it contains the container this view is scoped to")]
    IsScopeParent,

    #[error("components can't be added to a dynamic view when the scope is a software system")]
    ComponentInSystemScope,

    #[error("only people and software systems can be added to an unscoped dynamic view")]
    OnlyPeopleAndSoftwareSystems,

    #[error("its parent {parent} is already in this view")]
    ParentInView { parent: Arc<str> },

    #[error("its child {child} is already in this view")]
    ChildInView { child: Arc<str> },

    #[error("a {expected} scope cannot be a {actual}")]
    WrongScopeKind {
        expected: &'static str,
        actual: &'static str,
    },
}
