//! Builder configuration via `pact.toml`
//!
//! Selects the default specification version used by `to_pact()` and,
//! optionally, default consumer and provider names.

use crate::error::{PactError, Result};
use crate::pact::PactSpecVersion;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "pact.toml";

/// Builder configuration loaded from `pact.toml`.
///
/// # Example
///
/// ```toml
/// # Specification version: "V3" (default) or "V4"
/// spec_version = "V4"
/// consumer = "billing-service"
/// provider = "order-service"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PactConfig {
    /// Specification version selecting the default document shape
    #[serde(default)]
    pub spec_version: PactSpecVersion,
    /// Default consumer name
    #[serde(default)]
    pub consumer: Option<String>,
    /// Default provider name
    #[serde(default)]
    pub provider: Option<String>,
}

impl PactConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Pact builder configuration
#
# Specification version: "V3" (default) or "V4"
#   "V3" = message pact with a "messages" list
#   "V4" = pact with typed "interactions"
spec_version = "V3"

# Default participant names, used unless the builder sets them.
# consumer = "my-consumer"
# provider = "my-provider"
"#
    }

    /// Read and parse config from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PactError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            PactError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

impl FromStr for PactConfig {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
