//! Model elements and their kinds.

use std::sync::Arc;

use crate::base::ElementId;

// ============================================================================
// ELEMENT KINDS
// ============================================================================

/// The four kinds of static structure element a dynamic view can show.
///
/// Scope rules match exhaustively on this enum, so adding a kind here is a
/// compile error everywhere a rule has to be decided for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    Person,
    SoftwareSystem,
    Container,
    Component,
}

impl StructuralKind {
    /// The kind an element's parent must have, if it may have one at all.
    pub fn parent_kind(self) -> Option<StructuralKind> {
        match self {
            Self::Person | Self::SoftwareSystem => None,
            Self::Container => Some(Self::SoftwareSystem),
            Self::Component => Some(Self::Container),
        }
    }
}

/// The kind of a model element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    // Static structure
    Person,
    SoftwareSystem,
    Container,
    Component,

    // Deployment
    DeploymentNode,
    InfrastructureNode,
    SoftwareSystemInstance,
    ContainerInstance,
}

impl ElementKind {
    /// The structural kind, or `None` for deployment elements.
    pub fn structural(self) -> Option<StructuralKind> {
        match self {
            Self::Person => Some(StructuralKind::Person),
            Self::SoftwareSystem => Some(StructuralKind::SoftwareSystem),
            Self::Container => Some(StructuralKind::Container),
            Self::Component => Some(StructuralKind::Component),
            Self::DeploymentNode
            | Self::InfrastructureNode
            | Self::SoftwareSystemInstance
            | Self::ContainerInstance => None,
        }
    }

    /// Returns true for people, software systems, containers and components.
    pub fn is_structural(self) -> bool {
        self.structural().is_some()
    }

    /// Human-readable kind name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::SoftwareSystem => "software system",
            Self::Container => "container",
            Self::Component => "component",
            Self::DeploymentNode => "deployment node",
            Self::InfrastructureNode => "infrastructure node",
            Self::SoftwareSystemInstance => "software system instance",
            Self::ContainerInstance => "container instance",
        }
    }
}

impl From<StructuralKind> for ElementKind {
    fn from(kind: StructuralKind) -> Self {
        match kind {
            StructuralKind::Person => Self::Person,
            StructuralKind::SoftwareSystem => Self::SoftwareSystem,
            StructuralKind::Container => Self::Container,
            StructuralKind::Component => Self::Component,
        }
    }
}

// ============================================================================
// ELEMENT
// ============================================================================

/// An element of the architecture model.
///
/// Containers are owned by a software system and components by a container;
/// `parent` is the only containment link the dynamic view core reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name.
    pub name: Arc<str>,
    /// Element kind.
    pub kind: ElementKind,
    /// Containing element, if any.
    pub parent: Option<ElementId>,
}

impl Element {
    /// Create a new parentless element.
    pub fn new(id: impl Into<ElementId>, name: impl Into<Arc<str>>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent: None,
        }
    }

    /// Create a person.
    pub fn person(id: impl Into<ElementId>, name: impl Into<Arc<str>>) -> Self {
        Self::new(id, name, ElementKind::Person)
    }

    /// Create a software system.
    pub fn software_system(id: impl Into<ElementId>, name: impl Into<Arc<str>>) -> Self {
        Self::new(id, name, ElementKind::SoftwareSystem)
    }

    /// Create a container inside `parent`.
    pub fn container(
        id: impl Into<ElementId>,
        name: impl Into<Arc<str>>,
        parent: impl Into<ElementId>,
    ) -> Self {
        Self::new(id, name, ElementKind::Container).with_parent(parent)
    }

    /// Create a component inside `parent`.
    pub fn component(
        id: impl Into<ElementId>,
        name: impl Into<Arc<str>>,
        parent: impl Into<ElementId>,
    ) -> Self {
        Self::new(id, name, ElementKind::Component).with_parent(parent)
    }

    /// Set the containing element.
    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// The structural kind, if this is a static structure element.
    pub fn structural_kind(&self) -> Option<StructuralKind> {
        self.kind.structural()
    }
}
