//! Which elements a dynamic view may show.
//!
//! A dynamic view is scoped to nothing, a software system, or a container.
//! The scope decides which structural elements are admissible:
//!
//! | scope            | person | software system | container | component |
//! |------------------|--------|-----------------|-----------|-----------|
//! | none             | yes    | yes             | no        | no        |
//! | software system  | yes    | not the scope   | yes       | no        |
//! | container        | yes    | not its parent  | not scope | yes       |
//!
//! Scoped views additionally never mix an element with its own parent or
//! children.

use tracing::trace;

use super::error::{DynamicViewError, NotAddableReason};
use crate::base::ElementId;
use crate::model::{Element, ElementKind, ElementView, ModelIndex, StructuralKind};

/// The element a dynamic view is centred on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewScope {
    #[default]
    None,
    SoftwareSystem(ElementId),
    Container(ElementId),
}

impl ViewScope {
    /// Build a scope from the two optional scope elements.
    ///
    /// At most one of them may be given.
    pub fn from_parts(
        software_system: Option<ElementId>,
        container: Option<ElementId>,
    ) -> Result<Self, DynamicViewError> {
        match (software_system, container) {
            (Some(software_system), Some(container)) => {
                Err(DynamicViewError::InvalidScopeConfiguration {
                    software_system,
                    container,
                })
            }
            (Some(software_system), None) => Ok(Self::SoftwareSystem(software_system)),
            (None, Some(container)) => Ok(Self::Container(container)),
            (None, None) => Ok(Self::None),
        }
    }

    /// The scope derived from an element's kind.
    pub fn for_element(element: &Element) -> Result<Self, DynamicViewError> {
        match element.kind {
            ElementKind::SoftwareSystem => Ok(Self::SoftwareSystem(element.id.clone())),
            ElementKind::Container => Ok(Self::Container(element.id.clone())),
            other => Err(not_addable(
                element,
                NotAddableReason::WrongScopeKind {
                    expected: "software system or container",
                    actual: other.display_name(),
                },
            )),
        }
    }

    /// The scope element, if any.
    pub fn element(&self) -> Option<&ElementId> {
        match self {
            Self::None => None,
            Self::SoftwareSystem(id) | Self::Container(id) => Some(id),
        }
    }

    /// Check that the scope element exists and has the kind the scope claims.
    pub fn validate<M: ModelIndex>(&self, model: &M) -> Result<(), DynamicViewError> {
        let (id, expected) = match self {
            Self::None => return Ok(()),
            Self::SoftwareSystem(id) => (id, ElementKind::SoftwareSystem),
            Self::Container(id) => (id, ElementKind::Container),
        };
        let element = model
            .element(id)
            .ok_or_else(|| DynamicViewError::UnknownElement(id.clone()))?;
        if element.kind != expected {
            return Err(not_addable(
                element,
                NotAddableReason::WrongScopeKind {
                    expected: expected.display_name(),
                    actual: element.kind.display_name(),
                },
            ));
        }
        Ok(())
    }
}

pub(crate) fn not_addable(element: &Element, reason: NotAddableReason) -> DynamicViewError {
    DynamicViewError::ElementNotAddable {
        element: element.id.clone(),
        name: element.name.clone(),
        reason,
    }
}

/// Decides whether an element may be added to a scoped view.
pub struct ScopeValidator<'a, M: ModelIndex> {
    model: &'a M,
    scope: &'a ViewScope,
}

impl<'a, M: ModelIndex> ScopeValidator<'a, M> {
    pub fn new(model: &'a M, scope: &'a ViewScope) -> Self {
        Self { model, scope }
    }

    /// Check `candidate` against the scope rules, given the elements that
    /// are (or are about to be) in the view.
    ///
    /// Pure: nothing is registered on success.
    pub fn check<'e>(
        &self,
        candidate: &ElementId,
        in_view: impl IntoIterator<Item = &'e ElementId>,
    ) -> Result<(), DynamicViewError> {
        let element = self.lookup(candidate)?;
        let Some(kind) = element.structural_kind() else {
            return Err(not_addable(
                element,
                NotAddableReason::NotStructural {
                    kind: element.kind.display_name(),
                },
            ));
        };

        match self.scope {
            ViewScope::SoftwareSystem(system) => match kind {
                StructuralKind::Person => return Ok(()),
                StructuralKind::SoftwareSystem | StructuralKind::Container => {
                    if element.id == *system {
                        return Err(not_addable(element, NotAddableReason::IsScope));
                    }
                }
                StructuralKind::Component => {
                    return Err(not_addable(
                        element,
                        NotAddableReason::ComponentInSystemScope,
                    ));
                }
            },
            ViewScope::Container(container) => match kind {
                StructuralKind::Person => return Ok(()),
                StructuralKind::SoftwareSystem
                | StructuralKind::Container
                | StructuralKind::Component => {
                    if element.id == *container {
                        return Err(not_addable(element, NotAddableReason::IsScope));
                    }
                    let scope = self.lookup(container)?;
                    if scope.parent.as_ref() == Some(&element.id) {
                        return Err(not_addable(element, NotAddableReason::IsScopeParent));
                    }
                }
            },
            ViewScope::None => {
                return match kind {
                    StructuralKind::Person | StructuralKind::SoftwareSystem => Ok(()),
                    StructuralKind::Container | StructuralKind::Component => Err(not_addable(
                        element,
                        NotAddableReason::OnlyPeopleAndSoftwareSystems,
                    )),
                };
            }
        }

        self.check_parent_and_children_not_in_view(element, in_view)
    }

    fn check_parent_and_children_not_in_view<'e>(
        &self,
        element: &Element,
        in_view: impl IntoIterator<Item = &'e ElementId>,
    ) -> Result<(), DynamicViewError> {
        let candidate = ElementView::new(element, self.model);
        for id in in_view {
            if *id == element.id {
                continue;
            }
            let Some(other) = ElementView::from_id(id, self.model) else {
                continue;
            };
            if other.is_ancestor_of(&candidate) {
                trace!("[SCOPE] {} rejected: parent {} in view", element.id, id);
                return Err(not_addable(
                    element,
                    NotAddableReason::ParentInView {
                        parent: other.element.name.clone(),
                    },
                ));
            }
            if candidate.is_ancestor_of(&other) {
                trace!("[SCOPE] {} rejected: child {} in view", element.id, id);
                return Err(not_addable(
                    element,
                    NotAddableReason::ChildInView {
                        child: other.element.name.clone(),
                    },
                ));
            }
        }
        Ok(())
    }

    fn lookup(&self, id: &ElementId) -> Result<&'a Element, DynamicViewError> {
        self.model
            .element(id)
            .ok_or_else(|| DynamicViewError::UnknownElement(id.clone()))
    }
}
