//! The dynamic view aggregate.
//!
//! A dynamic view shows how elements of the static model collaborate at
//! runtime to implement a user story, use case or feature. It is based upon
//! a UML communication diagram: elements are laid out freely and each
//! interaction carries an order label.
//!
//! ## Example
//!
//! ```ignore
//! use c4dyn::model::Model;
//! use c4dyn::view::{DynamicView, ViewConfig};
//!
//! let mut view = DynamicView::for_software_system(&model, "bank", ViewConfig::new("SignIn"))?;
//! view.add(&web, &api, None, Some("JSON/HTTPS"))?;                  // "1"
//! {
//!     let mut branch = view.parallel_sequence(false);
//!     branch.add(&api, &db, None, None)?;                          // "2"
//! }
//! {
//!     let mut branch = view.parallel_sequence(true);
//!     branch.add(&api, &audit, None, None)?;                       // "2"
//! }
//! view.add(&api, &web, Some("Returns token to"), None)?;            // "3", a response
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use indexmap::IndexSet;
use smol_str::SmolStr;
use tracing::{debug, error};

use super::config::ViewConfig;
use super::error::DynamicViewError;
use super::resolver::RelationshipResolver;
use super::scope::{ScopeValidator, ViewScope};
use super::sequence::{FrameKind, SequenceTracker};
use crate::base::{ElementId, RelationshipId};
use crate::model::{Model, ModelIndex};

/// One numbered interaction of a dynamic view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionRecord {
    /// The declared relationship backing the interaction.
    pub relationship: RelationshipId,
    /// Description shown on the diagram.
    pub description: Arc<str>,
    /// Order label, e.g. `"3"` or `"2.1"`.
    pub order: SmolStr,
    /// True when drawn opposite to the declared relationship.
    pub response: bool,
}

/// A request to add an interaction, for call sites that prefer named fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interaction {
    pub source: ElementId,
    pub destination: ElementId,
    pub description: Option<String>,
    pub technology: Option<String>,
}

impl Interaction {
    pub fn new(source: impl Into<ElementId>, destination: impl Into<ElementId>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            description: None,
            technology: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }
}

/// A dynamic view over a model.
///
/// The view borrows the model read-only; all of its own state (elements,
/// interactions, numbering) is owned here.
#[derive(Clone, Debug)]
pub struct DynamicView<'m, M: ModelIndex = Model> {
    model: &'m M,
    scope: ViewScope,
    config: ViewConfig,
    elements: IndexSet<ElementId>,
    interactions: Vec<InteractionRecord>,
    sequence: SequenceTracker,
}

impl<'m, M: ModelIndex> DynamicView<'m, M> {
    // ── Construction ─────────────────────────────────────────────────

    /// Create a view with the given scope.
    ///
    /// The scope element must exist and be of the kind the scope names.
    pub fn new(
        model: &'m M,
        scope: ViewScope,
        config: ViewConfig,
    ) -> Result<Self, DynamicViewError> {
        scope.validate(model)?;
        Ok(Self::restore(model, scope, config, IndexSet::new(), Vec::new()))
    }

    /// Create a view from the two optional scope elements; at most one may be given.
    pub fn with_scope(
        model: &'m M,
        software_system: Option<ElementId>,
        container: Option<ElementId>,
        config: ViewConfig,
    ) -> Result<Self, DynamicViewError> {
        Self::new(model, ViewScope::from_parts(software_system, container)?, config)
    }

    /// Create a view scoped to a software system.
    pub fn for_software_system(
        model: &'m M,
        software_system: impl Into<ElementId>,
        config: ViewConfig,
    ) -> Result<Self, DynamicViewError> {
        Self::new(model, ViewScope::SoftwareSystem(software_system.into()), config)
    }

    /// Create a view scoped to a container.
    pub fn for_container(
        model: &'m M,
        container: impl Into<ElementId>,
        config: ViewConfig,
    ) -> Result<Self, DynamicViewError> {
        Self::new(model, ViewScope::Container(container.into()), config)
    }

    /// Create a view without a scope: only people and software systems.
    pub fn unscoped(model: &'m M, config: ViewConfig) -> Self {
        Self::restore(model, ViewScope::None, config, IndexSet::new(), Vec::new())
    }

    /// Reassemble a view from already-validated parts.
    pub(crate) fn restore(
        model: &'m M,
        scope: ViewScope,
        config: ViewConfig,
        elements: IndexSet<ElementId>,
        interactions: Vec<InteractionRecord>,
    ) -> Self {
        let mut sequence = SequenceTracker::new();
        for interaction in &interactions {
            sequence.resume_after(&interaction.order);
        }
        Self {
            model,
            scope,
            config,
            elements,
            interactions,
            sequence,
        }
    }

    // ── Interactions ─────────────────────────────────────────────────

    /// Add an interaction from `source` to `destination`.
    ///
    /// Looks for a relationship in the model from the source to the
    /// destination with matching description and technology (if given),
    /// falling back to a "response" along a relationship declared the other
    /// way round; for responses the description is ignored when matching
    /// but still shown.
    ///
    /// Nothing is changed unless the whole operation succeeds.
    pub fn add(
        &mut self,
        source: &ElementId,
        destination: &ElementId,
        description: Option<&str>,
        technology: Option<&str>,
    ) -> Result<InteractionRecord, DynamicViewError> {
        let validator = ScopeValidator::new(self.model, &self.scope);
        validator.check(source, &self.elements)?;
        validator.check(destination, self.elements.iter().chain([source]))?;

        let resolved = RelationshipResolver::new(self.model)
            .with_ambiguity_reports(self.config.report_ambiguous_matches)
            .resolve(source, destination, description, technology)?;

        let description = description
            .filter(|d| !d.is_empty())
            .map(Arc::from)
            .unwrap_or_else(|| resolved.relationship.description.clone());

        self.elements.insert(source.clone());
        self.elements.insert(destination.clone());
        let record = InteractionRecord {
            relationship: resolved.relationship.id.clone(),
            description,
            order: self.sequence.next(),
            response: resolved.is_response,
        };
        debug!(
            "[DYNAMIC_VIEW] {} {source} -> {destination} via {} (response={})",
            record.order, record.relationship, record.response
        );
        self.interactions.push(record.clone());
        Ok(record)
    }

    /// Add an interaction described by an [`Interaction`] request.
    pub fn add_with(
        &mut self,
        interaction: &Interaction,
    ) -> Result<InteractionRecord, DynamicViewError> {
        self.add(
            &interaction.source,
            &interaction.destination,
            interaction.description.as_deref(),
            interaction.technology.as_deref(),
        )
    }

    // ── Parallel and child sequences ─────────────────────────────────

    /// Start a parallel sequence that ends when the returned guard drops.
    ///
    /// Parallel sequences let several flows share the same order numbers:
    ///
    /// ```text
    ///            /-> C -\
    ///   A -> B -{        }-> E -> F
    ///            \-> D -/
    /// ```
    ///
    /// Both B→C and B→D get "2", C→E and D→E get "3". Open the first branch
    /// with `continue_numbering = false` so the second starts over at "2",
    /// and the last with `true` so E→F continues at "4".
    pub fn parallel_sequence(&mut self, continue_numbering: bool) -> ParallelSequence<'_, 'm, M> {
        self.sequence.start_parallel();
        ParallelSequence {
            depth: self.sequence.depth(),
            view: self,
            continue_numbering,
        }
    }

    /// Start a nested subsequence ("2.1", "2.2", …) that ends when the
    /// returned guard drops.
    pub fn child_sequence(&mut self) -> ChildSequence<'_, 'm, M> {
        self.sequence.start_child();
        ChildSequence {
            depth: self.sequence.depth(),
            view: self,
        }
    }

    /// Start a parallel sequence; must be paired with
    /// [`end_parallel_sequence`](Self::end_parallel_sequence).
    pub fn start_parallel_sequence(&mut self) {
        self.sequence.start_parallel();
    }

    /// End the innermost parallel sequence.
    pub fn end_parallel_sequence(
        &mut self,
        continue_numbering: bool,
    ) -> Result<(), DynamicViewError> {
        Ok(self.sequence.end_parallel(continue_numbering)?)
    }

    /// Start a child sequence; must be paired with
    /// [`end_child_sequence`](Self::end_child_sequence).
    pub fn start_child_sequence(&mut self) {
        self.sequence.start_child();
    }

    /// End the innermost child sequence.
    pub fn end_child_sequence(&mut self) -> Result<(), DynamicViewError> {
        Ok(self.sequence.end_child()?)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn key(&self) -> Option<&str> {
        self.config.key.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.config.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    /// Elements in the order they were first added.
    pub fn elements(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.iter()
    }

    pub fn contains_element(&self, id: &ElementId) -> bool {
        self.elements.contains(id)
    }

    /// Interactions in the order they were added.
    pub fn interactions(&self) -> &[InteractionRecord] {
        &self.interactions
    }

    /// Interactions backed by the given relationship.
    pub fn interactions_for<'a>(
        &'a self,
        relationship: &RelationshipId,
    ) -> impl Iterator<Item = &'a InteractionRecord> + use<'a, 'm, M> {
        let relationship = relationship.clone();
        self.interactions
            .iter()
            .filter(move |i| i.relationship == relationship)
    }

    /// The numbering state.
    pub fn sequence(&self) -> &SequenceTracker {
        &self.sequence
    }
}

/// Guard for an open parallel sequence; see [`DynamicView::parallel_sequence`].
///
/// Dereferences to the view. Dropping it ends the sequence, including on
/// early return and unwinding.
///
/// # Panics
///
/// Dropping the guard panics if its sequence was already ended through the
/// explicit `end_*` calls, or if a sequence opened inside it is still open.
pub struct ParallelSequence<'v, 'm, M: ModelIndex> {
    view: &'v mut DynamicView<'m, M>,
    continue_numbering: bool,
    // Stack depth right after the guard's frame was pushed.
    depth: usize,
}

impl<'m, M: ModelIndex> Deref for ParallelSequence<'_, 'm, M> {
    type Target = DynamicView<'m, M>;

    fn deref(&self) -> &Self::Target {
        &*self.view
    }
}

impl<M: ModelIndex> DerefMut for ParallelSequence<'_, '_, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.view
    }
}

impl<M: ModelIndex> Drop for ParallelSequence<'_, '_, M> {
    fn drop(&mut self) {
        let sequence = &mut self.view.sequence;
        if !owns_innermost(sequence, self.depth, FrameKind::Parallel) {
            guard_out_of_order(sequence, self.depth, FrameKind::Parallel);
            return;
        }
        if let Err(err) = sequence.end_parallel(self.continue_numbering) {
            error!("[DYNAMIC_VIEW] parallel sequence guard: {err}");
        }
    }
}

/// Guard for an open child sequence; see [`DynamicView::child_sequence`].
///
/// Same drop contract as [`ParallelSequence`].
pub struct ChildSequence<'v, 'm, M: ModelIndex> {
    view: &'v mut DynamicView<'m, M>,
    depth: usize,
}

impl<'m, M: ModelIndex> Deref for ChildSequence<'_, 'm, M> {
    type Target = DynamicView<'m, M>;

    fn deref(&self) -> &Self::Target {
        &*self.view
    }
}

impl<M: ModelIndex> DerefMut for ChildSequence<'_, '_, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.view
    }
}

impl<M: ModelIndex> Drop for ChildSequence<'_, '_, M> {
    fn drop(&mut self) {
        let sequence = &mut self.view.sequence;
        if !owns_innermost(sequence, self.depth, FrameKind::Child) {
            guard_out_of_order(sequence, self.depth, FrameKind::Child);
            return;
        }
        if let Err(err) = sequence.end_child() {
            error!("[DYNAMIC_VIEW] child sequence guard: {err}");
        }
    }
}

fn owns_innermost(sequence: &SequenceTracker, depth: usize, kind: FrameKind) -> bool {
    sequence.depth() == depth && sequence.innermost() == kind
}

/// The guard's frame is no longer the innermost one. Nothing is popped;
/// while already unwinding this only logs.
fn guard_out_of_order(sequence: &SequenceTracker, depth: usize, kind: FrameKind) {
    let message = format!(
        "[DYNAMIC_VIEW] {kind} sequence guard opened at depth {depth} was closed out of order \
         (depth is now {}, innermost {})",
        sequence.depth(),
        sequence.innermost()
    );
    if std::thread::panicking() {
        error!("{message}");
    } else {
        panic!("{message}");
    }
}
