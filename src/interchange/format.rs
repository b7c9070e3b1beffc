//! Common trait for view interchange formats.

use super::InterchangeError;
use super::io::DynamicViewIo;

/// Trait for view interchange formats.
///
/// Implementations convert between the serialized [`DynamicViewIo`]
/// representation and bytes. Hydrating the representation against a model
/// is a separate step (see [`DynamicView::hydrate`](crate::view::DynamicView::hydrate)),
/// so a format never needs a model.
pub trait ViewFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    /// Read a view from bytes.
    fn read(&self, input: &[u8]) -> Result<DynamicViewIo, InterchangeError>;

    /// Write a view to bytes.
    fn write(&self, view: &DynamicViewIo) -> Result<Vec<u8>, InterchangeError>;
}
