//! Reading and writing dynamic views.
//!
//! Views are stored by reference: element and relationship IDs, plus each
//! interaction's order label and response flag. The model itself is not
//! part of the file.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  JSON File   │     │  YAML File   │
//! └──────┬───────┘     └──────┬───────┘
//!        ▼                    ▼
//! ┌─────────────────────────────────────────┐
//! │            ViewFormat trait             │
//! │  - read(&[u8]) -> DynamicViewIo         │
//! │  - write(&DynamicViewIo) -> Vec<u8>     │
//! └──────────────────┬──────────────────────┘
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │  DynamicView::hydrate(&model, &io)      │
//! │  DynamicViewIo::from_view(&view)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use c4dyn::interchange::{read_file, write_file};
//! use c4dyn::view::DynamicView;
//!
//! let io = read_file(Path::new("signin.json"))?;
//! let mut view = DynamicView::hydrate(&model, &io)?;
//! view.add(&api, &web, Some("Returns token to"), None)?;
//! write_file(Path::new("signin.yaml"), &view)?;
//! ```

mod error;
mod format;
mod io;
mod json;
mod yaml;

use std::path::Path;

use tracing::debug;

pub use error::InterchangeError;
pub use format::ViewFormat;
pub use io::{DynamicViewIo, ElementViewIo, RelationshipViewIo};
pub use json::Json;
pub use yaml::Yaml;

use crate::model::ModelIndex;
use crate::view::DynamicView;

/// Every format this module can read and write.
const FORMATS: &[&dyn ViewFormat] = &[&Json, &Yaml];

/// Supported file extensions for interchange formats.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    FORMATS.iter().flat_map(|format| format.extensions().iter().copied())
}

/// Detect format from file extension (case-insensitive).
pub fn detect_format(path: &Path) -> Option<&'static dyn ViewFormat> {
    let ext = path.extension()?.to_str()?;
    FORMATS
        .iter()
        .copied()
        .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Detect format from MIME type.
pub fn detect_format_from_mime(mime: &str) -> Option<&'static dyn ViewFormat> {
    let mime = mime.split(';').next().unwrap_or_default().trim();
    FORMATS
        .iter()
        .copied()
        .find(|format| format.mime_type().eq_ignore_ascii_case(mime))
}

fn format_for(path: &Path) -> Result<&'static dyn ViewFormat, InterchangeError> {
    detect_format(path)
        .ok_or_else(|| InterchangeError::UnsupportedFormat(path.display().to_string()))
}

/// Read a serialized view, picking the format by extension.
pub fn read_file(path: &Path) -> Result<DynamicViewIo, InterchangeError> {
    let format = format_for(path)?;
    let bytes = std::fs::read(path)?;
    debug!("[INTERCHANGE] reading {} as {}", path.display(), format.name());
    format.read(&bytes)
}

/// Write a view, picking the format by extension.
pub fn write_file<M: ModelIndex>(
    path: &Path,
    view: &DynamicView<'_, M>,
) -> Result<(), InterchangeError> {
    let format = format_for(path)?;
    let bytes = format.write(&DynamicViewIo::from_view(view))?;
    debug!("[INTERCHANGE] writing {} as {}", path.display(), format.name());
    std::fs::write(path, bytes)?;
    Ok(())
}
