//! JSON format support, in the workspace JSON layout.

use super::io::DynamicViewIo;
use super::{InterchangeError, ViewFormat};

/// JSON format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl ViewFormat for Json {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn read(&self, input: &[u8]) -> Result<DynamicViewIo, InterchangeError> {
        serde_json::from_slice(input).map_err(|e| InterchangeError::json(e.to_string()))
    }

    fn write(&self, view: &DynamicViewIo) -> Result<Vec<u8>, InterchangeError> {
        serde_json::to_vec_pretty(view).map_err(|e| InterchangeError::json(e.to_string()))
    }
}
