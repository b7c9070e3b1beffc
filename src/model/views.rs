//! Borrowed navigation over model elements.
//!
//! ## Usage
//!
//! ```ignore
//! use c4dyn::model::{ElementView, Model};
//!
//! let view = ElementView::from_id(&component_id, &model).unwrap();
//! for ancestor in view.ancestors() {
//!     println!("{} ({})", ancestor.name(), ancestor.kind().display_name());
//! }
//! ```

use super::element::{Element, ElementKind};
use super::index::ModelIndex;
use crate::base::ElementId;
use crate::base::constants::MAX_NESTING_DEPTH;

/// A borrowed view over a model element with containment accessors.
pub struct ElementView<'m, M: ModelIndex> {
    pub element: &'m Element,
    pub model: &'m M,
}

impl<M: ModelIndex> Clone for ElementView<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ModelIndex> Copy for ElementView<'_, M> {}

impl<'m, M: ModelIndex> ElementView<'m, M> {
    /// Create a new view over an element.
    pub fn new(element: &'m Element, model: &'m M) -> Self {
        Self { element, model }
    }

    /// Create a view from an element ID. Returns None if the ID is not in the model.
    pub fn from_id(id: &ElementId, model: &'m M) -> Option<Self> {
        model.element(id).map(|element| Self { element, model })
    }

    // ── Identity ────────────────────────────────────────────────────

    pub fn id(&self) -> &'m ElementId {
        &self.element.id
    }

    pub fn name(&self) -> &'m str {
        &self.element.name
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind
    }

    // ── Containment ─────────────────────────────────────────────────

    /// The containing element (None for top-level elements).
    pub fn parent(&self) -> Option<ElementView<'m, M>> {
        self.element
            .parent
            .as_ref()
            .and_then(|id| Self::from_id(id, self.model))
    }

    /// Containing elements, innermost first.
    ///
    /// The walk stops after [`MAX_NESTING_DEPTH`] steps.
    pub fn ancestors(&self) -> impl Iterator<Item = ElementView<'m, M>> + use<'m, M> {
        std::iter::successors(self.parent(), |view| view.parent()).take(MAX_NESTING_DEPTH)
    }

    /// Whether this element (transitively) contains `other`.
    pub fn is_ancestor_of(&self, other: &ElementView<'m, M>) -> bool {
        other.is_descendant_of(self.id())
    }

    /// Whether this element is (transitively) contained by `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &ElementId) -> bool {
        self.ancestors().any(|view| view.id() == ancestor)
    }
}
