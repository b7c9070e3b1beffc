//! Per-view settings.

#[cfg(feature = "interchange")]
use serde::{Deserialize, Serialize};

/// Settings of a dynamic view.
///
/// Can be read from JSON or YAML when the `interchange` feature is enabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase", default))]
pub struct ViewConfig {
    /// Unique key of the view within its workspace.
    #[cfg_attr(feature = "interchange", serde(skip_serializing_if = "Option::is_none"))]
    pub key: Option<String>,

    /// Diagram title.
    #[cfg_attr(feature = "interchange", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,

    /// Free-text description of the collaboration shown.
    #[cfg_attr(feature = "interchange", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,

    /// Warn (via `tracing`) when more than one declared relationship could
    /// back an interaction.
    pub report_ambiguous_matches: bool,
}

impl ViewConfig {
    /// Create a config with the given view key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enable or disable ambiguity warnings.
    pub fn with_ambiguity_reports(mut self, enabled: bool) -> Self {
        self.report_ambiguous_matches = enabled;
        self
    }
}
