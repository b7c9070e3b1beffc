//! YAML format support.
//!
//! Same structure as the JSON form, in YAML syntax:
//!
//! ```yaml
//! key: SignIn
//! elementId: bank
//! elements:
//!   - id: web
//!   - id: api
//! relationships:
//!   - id: r1
//!     description: Submits credentials to
//!     order: "1"
//! ```

use super::io::DynamicViewIo;
use super::{InterchangeError, ViewFormat};

/// YAML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl ViewFormat for Yaml {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn mime_type(&self) -> &'static str {
        "application/x-yaml"
    }

    fn read(&self, input: &[u8]) -> Result<DynamicViewIo, InterchangeError> {
        let content = std::str::from_utf8(input)
            .map_err(|e| InterchangeError::yaml(format!("Invalid UTF-8: {e}")))?;
        serde_yaml::from_str(content).map_err(|e| InterchangeError::yaml(e.to_string()))
    }

    fn write(&self, view: &DynamicViewIo) -> Result<Vec<u8>, InterchangeError> {
        serde_yaml::to_string(view)
            .map(String::into_bytes)
            .map_err(|e| InterchangeError::yaml(e.to_string()))
    }
}
