//! Transform configuration

use crate::TransformError;
use serde::{Deserialize, Serialize};

/// Options for a transform run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformConfig {
    /// Route diagnostics to the `log` facade
    pub log_diagnostics: bool,
    /// Make `Transformer::try_run` fail on any warning
    pub strict: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            log_diagnostics: true,
            strict: false,
        }
    }
}

impl TransformConfig {
    /// Load configuration from JSON, missing fields take their defaults
    pub fn from_json(source: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Enable strict mode
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Silence diagnostic logging
    pub fn quiet(mut self) -> Self {
        self.log_diagnostics = false;
        self
    }
}
