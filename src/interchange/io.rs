//! Serialized form of a dynamic view.
//!
//! Mirrors the workspace JSON layout: a view refers to its scope element and
//! to model elements/relationships by ID, and each relationship view carries
//! its order label and response flag.

use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

use super::InterchangeError;
use crate::base::{ElementId, RelationshipId};
use crate::model::ModelIndex;
use crate::view::{DynamicView, InteractionRecord, ViewConfig, ViewScope};

/// A view element reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementViewIo {
    pub id: String,
}

/// A numbered interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipViewIo {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub order: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub response: bool,
}

/// A dynamic view as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicViewIo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ID of the scope element (software system or container).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementViewIo>,
    #[serde(default)]
    pub relationships: Vec<RelationshipViewIo>,
}

impl DynamicViewIo {
    /// Snapshot a view.
    pub fn from_view<M: ModelIndex>(view: &DynamicView<'_, M>) -> Self {
        Self {
            key: view.key().map(str::to_string),
            title: view.title().map(str::to_string),
            description: view.description().map(str::to_string),
            element_id: view.scope().element().map(|id| id.to_string()),
            elements: view
                .elements()
                .map(|id| ElementViewIo { id: id.to_string() })
                .collect(),
            relationships: view
                .interactions()
                .iter()
                .map(|interaction| RelationshipViewIo {
                    id: interaction.relationship.to_string(),
                    description: interaction.description.to_string(),
                    order: interaction.order.to_string(),
                    response: interaction.response,
                })
                .collect(),
        }
    }
}

impl<'m, M: ModelIndex> DynamicView<'m, M> {
    /// Rebuild a view from its serialized form.
    ///
    /// Every referenced element and relationship must exist in `model`.
    /// Numbering resumes after the highest top-level order label, so
    /// interactions added afterwards continue the sequence.
    pub fn hydrate(model: &'m M, io: &DynamicViewIo) -> Result<Self, InterchangeError> {
        let scope = match &io.element_id {
            None => ViewScope::None,
            Some(id) => {
                let element = model
                    .element(&ElementId::from(id.as_str()))
                    .ok_or_else(|| InterchangeError::unresolved_element(id.as_str()))?;
                ViewScope::for_element(element)
                    .map_err(|err| InterchangeError::invalid_view(err.to_string()))?
            }
        };

        let mut elements = IndexSet::with_capacity(io.elements.len());
        for element in &io.elements {
            let id = ElementId::from(element.id.as_str());
            if model.element(&id).is_none() {
                return Err(InterchangeError::unresolved_element(element.id.as_str()));
            }
            elements.insert(id);
        }

        let mut interactions = Vec::with_capacity(io.relationships.len());
        for relationship in &io.relationships {
            let id = RelationshipId::from(relationship.id.as_str());
            let declared = model.relationship(&id).ok_or_else(|| {
                InterchangeError::unresolved_relationship(relationship.id.as_str())
            })?;
            if relationship.order.is_empty() {
                return Err(InterchangeError::invalid_view(format!(
                    "relationship view {} has no order",
                    relationship.id
                )));
            }
            // Endpoints of an interaction are always in the view.
            elements.insert(declared.source.clone());
            elements.insert(declared.destination.clone());
            interactions.push(InteractionRecord {
                relationship: id,
                description: Arc::from(relationship.description.as_str()),
                order: SmolStr::new(&relationship.order),
                response: relationship.response,
            });
        }

        let config = ViewConfig {
            key: io.key.clone(),
            title: io.title.clone(),
            description: io.description.clone(),
            ..ViewConfig::default()
        };
        debug!(
            "[INTERCHANGE] hydrated view {:?}: {} elements, {} interactions",
            config.key,
            elements.len(),
            interactions.len()
        );
        Ok(Self::restore(model, scope, config, elements, interactions))
    }
}
