use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lint: LintSettings,
    pub output: OutputSettings,
}

/// Lint configuration (`[lint]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSettings {
    /// Rule code selectors to skip, matched by prefix
    pub ignore_checks: Vec<String>,
    /// Resource type prefixes subject to the tagging policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taggable_prefixes: Option<Vec<String>>,
    /// Minimum reported severity (error, warning, informational)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,
    /// Path patterns to skip
    pub exclude: Vec<String>,
    /// Honour `cfn-lint` suppressions in template metadata
    pub metadata_suppressions: bool,
    /// Per-rule levels (`[lint.rules]`, e.g. `E9000 = "warn"`)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub rules: HashMap<String, String>,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            ignore_checks: Vec::new(),
            taggable_prefixes: None,
            threshold: None,
            exclude: Vec::new(),
            metadata_suppressions: true,
            rules: HashMap::new(),
        }
    }
}

/// Output configuration (`[output]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default report format (pretty, parseable, json, github, junit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}
