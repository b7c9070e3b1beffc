//! Read-only access to a model, as consumed by the dynamic view core.

use super::element::Element;
use super::relationship::Relationship;
use super::store::Model;
use crate::base::{ElementId, RelationshipId};

/// The narrow read interface the dynamic view core needs from a model.
///
/// Implementations must yield relationships in declaration order: the
/// relationship resolver breaks ties by taking the first match.
pub trait ModelIndex {
    /// Look up an element by ID.
    fn element(&self, id: &ElementId) -> Option<&Element>;

    /// Look up a relationship by ID.
    fn relationship(&self, id: &RelationshipId) -> Option<&Relationship>;

    /// Relationships originating at `id`.
    fn efferent_relationships<'a>(
        &'a self,
        id: &ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + 'a;

    /// Relationships terminating at `id`.
    fn afferent_relationships<'a>(
        &'a self,
        id: &ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + 'a;
}

impl ModelIndex for Model {
    fn element(&self, id: &ElementId) -> Option<&Element> {
        self.get(id)
    }

    fn relationship(&self, id: &RelationshipId) -> Option<&Relationship> {
        self.get_relationship(id)
    }

    fn efferent_relationships<'a>(
        &'a self,
        id: &ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships_from(id)
    }

    fn afferent_relationships<'a>(
        &'a self,
        id: &ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships_to(id)
    }
}
