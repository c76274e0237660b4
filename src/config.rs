//! YAML configuration for the analyser engine.
//!
//! ```yaml
//! brace_style: Allman
//! extensions:
//!   .pyw: python
//!   .jav: java
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{BraceConfig, BraceStyle, Language};
use crate::error::AnalyserError;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "codelens.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyserConfig {
    /// Brace style to check. Absent means no brace check.
    #[serde(default)]
    pub brace_style: Option<BraceStyle>,
    /// Extra or overriding extension mappings, keyed by dotted extension.
    #[serde(default)]
    pub extensions: BTreeMap<String, Language>,
}

impl AnalyserConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&content)?;
        Ok(config)
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, AnalyserError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AnalyserConfig =
            serde_yaml::from_str(content).map_err(|e| AnalyserError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Brace config for the configured style, if any.
    pub fn brace_config(&self) -> Option<BraceConfig> {
        self.brace_style.map(BraceConfig::new)
    }

    fn validate(&self) -> Result<(), AnalyserError> {
        for ext in self.extensions.keys() {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(AnalyserError::Config(format!(
                    "extension '{}' must start with '.' (e.g. '.py')",
                    ext
                )));
            }
        }
        Ok(())
    }
}
