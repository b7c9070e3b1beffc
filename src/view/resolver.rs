//! Relationship resolution for interaction steps.
//!
//! An interaction "A → B" in a dynamic view must be backed by a relationship
//! declared in the model. The resolver looks for:
//!
//! 1. a *forward* relationship A → B whose description (if one was asked
//!    for) and technology (if one was asked for) match, or failing that
//! 2. a *response*: a relationship B → A declared the other way round,
//!    matched on technology only, so "B replies to A" can be drawn without
//!    declaring a reverse relationship.
//!
//! When several relationships qualify, the first one in declaration order
//! wins.

use tracing::{debug, warn};

use super::error::DynamicViewError;
use crate::base::ElementId;
use crate::model::{ModelIndex, Relationship};

/// A relationship matched for an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRelationship<'m> {
    pub relationship: &'m Relationship,
    /// True when the interaction runs opposite to the declared relationship.
    pub is_response: bool,
}

/// Finds the declared relationship an interaction refers to.
pub struct RelationshipResolver<'m, M: ModelIndex> {
    model: &'m M,
    report_ambiguous_matches: bool,
}

impl<'m, M: ModelIndex> RelationshipResolver<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            report_ambiguous_matches: false,
        }
    }

    /// Log a warning when more than one relationship could back an
    /// interaction. Resolution itself is unchanged.
    pub fn with_ambiguity_reports(mut self, enabled: bool) -> Self {
        self.report_ambiguous_matches = enabled;
        self
    }

    /// Resolve the relationship behind `source → destination`.
    ///
    /// An empty or missing `description` matches any description; a missing
    /// `technology` matches any technology.
    pub fn resolve(
        &self,
        source: &ElementId,
        destination: &ElementId,
        description: Option<&str>,
        technology: Option<&str>,
    ) -> Result<ResolvedRelationship<'m>, DynamicViewError> {
        let description = description.filter(|d| !d.is_empty());

        if let Some(relationship) = self.find(
            self.forward_candidates(source, destination, description, technology),
            source,
            destination,
        ) {
            debug!(
                "[RESOLVER] {source} -> {destination} resolved to {}",
                relationship.id
            );
            return Ok(ResolvedRelationship {
                relationship,
                is_response: false,
            });
        }

        if let Some(relationship) = self.find(
            self.response_candidates(source, destination, technology),
            source,
            destination,
        ) {
            debug!(
                "[RESOLVER] {source} -> {destination} resolved to {} as a response",
                relationship.id
            );
            return Ok(ResolvedRelationship {
                relationship,
                is_response: true,
            });
        }

        debug!("[RESOLVER] {source} -> {destination}: no relationship (technology={technology:?})");
        Err(DynamicViewError::RelationshipNotFound {
            source_name: self.name_of(source),
            destination_name: self.name_of(destination),
            technology: technology.map(Into::into),
        })
    }

    fn forward_candidates<'a>(
        &'a self,
        source: &'a ElementId,
        destination: &'a ElementId,
        description: Option<&'a str>,
        technology: Option<&'a str>,
    ) -> impl Iterator<Item = &'m Relationship> + 'a {
        let model: &'m M = self.model;
        model.efferent_relationships(source).filter(move |r| {
            r.destination == *destination
                && description.is_none_or(|d| *r.description == *d)
                && matches_technology(r, technology)
        })
    }

    fn response_candidates<'a>(
        &'a self,
        source: &'a ElementId,
        destination: &'a ElementId,
        technology: Option<&'a str>,
    ) -> impl Iterator<Item = &'m Relationship> + 'a {
        let model: &'m M = self.model;
        model
            .afferent_relationships(source)
            .filter(move |r| r.source == *destination && matches_technology(r, technology))
    }

    fn find(
        &self,
        mut candidates: impl Iterator<Item = &'m Relationship>,
        source: &ElementId,
        destination: &ElementId,
    ) -> Option<&'m Relationship> {
        let first = candidates.next()?;
        if self.report_ambiguous_matches {
            let others: Vec<_> = candidates.map(|r| r.id.as_str()).collect();
            if !others.is_empty() {
                warn!(
                    "[RESOLVER] {source} -> {destination} is ambiguous: using {} over {}",
                    first.id,
                    others.join(", ")
                );
            }
        }
        Some(first)
    }

    fn name_of(&self, id: &ElementId) -> std::sync::Arc<str> {
        self.model
            .element(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.as_str().into())
    }
}

fn matches_technology(relationship: &Relationship, technology: Option<&str>) -> bool {
    technology.is_none_or(|t| relationship.technology() == Some(t))
}
