//! Declared relationships between model elements.

use std::sync::Arc;

use crate::base::{ElementId, RelationshipId};

/// A relationship declared in the static model.
///
/// Directionality matters: the relationship is *efferent* for `source` and
/// *afferent* for `destination`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    /// Unique identifier.
    pub id: RelationshipId,
    /// Element the relationship originates at.
    pub source: ElementId,
    /// Element the relationship terminates at.
    pub destination: ElementId,
    /// Description, empty when none was declared.
    pub description: Arc<str>,
    /// Technology, if declared.
    pub technology: Option<Arc<str>>,
}

impl Relationship {
    /// Create a relationship with an empty description and no technology.
    pub fn new(
        id: impl Into<RelationshipId>,
        source: impl Into<ElementId>,
        destination: impl Into<ElementId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            destination: destination.into(),
            description: Arc::from(""),
            technology: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<Arc<str>>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the technology.
    pub fn with_technology(mut self, technology: impl Into<Arc<str>>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    /// The technology as a string slice.
    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }
}
