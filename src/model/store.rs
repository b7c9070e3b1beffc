//! Standalone architecture model.
//!
//! The `Model` stores elements and relationships by ID, in declaration
//! order, and keeps per-element efferent/afferent indices so a dynamic view
//! can ask "what leaves X" and "what arrives at X" without scanning.
//!
//! ```text
//! Model
//! ├── elements:      IndexMap<ElementId, Element>             (declaration order)
//! ├── relationships: IndexMap<RelationshipId, Relationship>   (declaration order)
//! ├── efferent:      FxHashMap<ElementId, Vec<RelationshipId>>
//! └── afferent:      FxHashMap<ElementId, Vec<RelationshipId>>
//! ```

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::element::{Element, ElementKind};
use super::relationship::Relationship;
use crate::base::{ElementId, RelationshipId};

/// Errors raised while building a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An element with this ID already exists.
    #[error("duplicate element id: {0}")]
    DuplicateElement(ElementId),

    /// A relationship with this ID already exists.
    #[error("duplicate relationship id: {0}")]
    DuplicateRelationship(RelationshipId),

    /// A referenced element is not in the model.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// The element cannot be nested inside the given parent.
    #[error("a {child} cannot be placed inside a {parent}")]
    InvalidNesting {
        child: &'static str,
        parent: &'static str,
    },

    /// The element kind requires a parent but none was given.
    #[error("a {0} must have a parent")]
    MissingParent(&'static str),
}

/// A C4 architecture model: elements plus declared relationships.
#[derive(Clone, Debug, Default)]
pub struct Model {
    elements: IndexMap<ElementId, Element>,
    relationships: IndexMap<RelationshipId, Relationship>,
    efferent: FxHashMap<ElementId, Vec<RelationshipId>>,
    afferent: FxHashMap<ElementId, Vec<RelationshipId>>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element to the model.
    ///
    /// Containers must sit inside a software system and components inside a
    /// container; no other structural element may have a parent.
    pub fn add_element(&mut self, element: Element) -> Result<ElementId, ModelError> {
        if self.elements.contains_key(&element.id) {
            return Err(ModelError::DuplicateElement(element.id));
        }
        self.check_nesting(&element)?;

        let id = element.id.clone();
        self.elements.insert(id.clone(), element);
        Ok(id)
    }

    fn check_nesting(&self, element: &Element) -> Result<(), ModelError> {
        let child = element.kind.display_name();
        let parent = match &element.parent {
            Some(parent_id) => Some(
                self.elements
                    .get(parent_id)
                    .ok_or_else(|| ModelError::UnknownElement(parent_id.clone()))?,
            ),
            None => None,
        };

        // Deployment elements are not constrained here.
        let Some(kind) = element.kind.structural() else {
            return Ok(());
        };

        match (kind.parent_kind(), parent) {
            (None, None) => Ok(()),
            (None, Some(parent)) => Err(ModelError::InvalidNesting {
                child,
                parent: parent.kind.display_name(),
            }),
            (Some(_), None) => Err(ModelError::MissingParent(child)),
            (Some(expected), Some(parent)) => {
                if parent.kind == ElementKind::from(expected) {
                    Ok(())
                } else {
                    Err(ModelError::InvalidNesting {
                        child,
                        parent: parent.kind.display_name(),
                    })
                }
            }
        }
    }

    /// Declare a relationship between two existing elements.
    pub fn add_relationship(
        &mut self,
        relationship: Relationship,
    ) -> Result<RelationshipId, ModelError> {
        if self.relationships.contains_key(&relationship.id) {
            return Err(ModelError::DuplicateRelationship(relationship.id));
        }
        for endpoint in [&relationship.source, &relationship.destination] {
            if !self.elements.contains_key(endpoint) {
                return Err(ModelError::UnknownElement(endpoint.clone()));
            }
        }

        let id = relationship.id.clone();
        self.efferent
            .entry(relationship.source.clone())
            .or_default()
            .push(id.clone());
        self.afferent
            .entry(relationship.destination.clone())
            .or_default()
            .push(id.clone());
        self.relationships.insert(id.clone(), relationship);
        Ok(id)
    }

    /// Get an element by ID.
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Get a relationship by ID.
    pub fn get_relationship(&self, id: &RelationshipId) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Find the first element with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Element> {
        self.elements.values().find(|e| &*e.name == name)
    }

    /// Iterate over all elements in declaration order.
    pub fn iter_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Iterate over all relationships in declaration order.
    pub fn iter_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    /// Elements directly contained by `parent`.
    pub fn children<'a>(
        &'a self,
        parent: &ElementId,
    ) -> impl Iterator<Item = &'a Element> + use<'a> {
        let parent = parent.clone();
        self.elements
            .values()
            .filter(move |e| e.parent.as_ref() == Some(&parent))
    }

    // ── Relationship queries ────────────────────────────────────────

    /// Relationships originating at `source`, in declaration order.
    pub fn relationships_from<'a>(
        &'a self,
        source: &ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + use<'a> {
        Self::lookup(&self.relationships, self.efferent.get(source))
    }

    /// Relationships terminating at `destination`, in declaration order.
    pub fn relationships_to<'a>(
        &'a self,
        destination: &ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + use<'a> {
        Self::lookup(&self.relationships, self.afferent.get(destination))
    }

    fn lookup<'a>(
        relationships: &'a IndexMap<RelationshipId, Relationship>,
        ids: Option<&'a Vec<RelationshipId>>,
    ) -> impl Iterator<Item = &'a Relationship> + use<'a> {
        ids.into_iter()
            .flatten()
            .filter_map(move |id| relationships.get(id))
    }

    /// Get the number of elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Get the number of relationships.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}
