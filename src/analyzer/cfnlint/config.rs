//! Configuration for the template linter.
//!
//! - Rule-level configuration (off/info/warn/error) and `ignore_checks`
//! - The taggable resource taxonomy
//! - Global settings (threshold, exclude patterns, metadata suppressions)

use std::collections::HashMap;

use crate::analyzer::cfnlint::taxonomy::Taxonomy;
use crate::analyzer::cfnlint::types::{ConfigLevel, RuleCode, Severity};
use crate::config::types::LintSettings;
use crate::error::ConfigError;

/// Main configuration for a lint run.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Per-rule level overrides, keyed by rule code.
    pub rules: HashMap<String, ConfigLevel>,
    /// Rule code selectors to skip entirely (prefix match).
    pub ignore_checks: Vec<String>,
    /// File patterns to exclude from linting.
    pub exclude: Vec<String>,
    /// Minimum severity threshold for reporting.
    pub threshold: Severity,
    /// Whether template/resource `Metadata` may suppress rules.
    pub metadata_suppressions: bool,
    /// Resource types subject to the tagging policy.
    pub taxonomy: Taxonomy,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            ignore_checks: Vec::new(),
            exclude: Vec::new(),
            threshold: Severity::Informational,
            metadata_suppressions: true,
            taxonomy: Taxonomy::default(),
        }
    }
}

impl LintConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclude pattern.
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Set multiple exclude patterns.
    pub fn with_excludes(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Set the severity threshold.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the taggable taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Allow or forbid metadata suppressions.
    pub fn with_metadata_suppressions(mut self, enabled: bool) -> Self {
        self.metadata_suppressions = enabled;
        self
    }

    /// Configure the level of a specific rule.
    pub fn with_rule(mut self, code: impl Into<String>, level: ConfigLevel) -> Self {
        self.rules.insert(code.into(), level);
        self
    }

    /// Skip rules matching a code selector.
    pub fn ignore(mut self, selector: impl Into<String>) -> Self {
        self.ignore_checks.push(selector.into());
        self
    }

    /// Set a rule to warn level.
    pub fn warn(self, code: impl Into<String>) -> Self {
        self.with_rule(code, ConfigLevel::Warn)
    }

    /// Set a rule to error level.
    pub fn error(self, code: impl Into<String>) -> Self {
        self.with_rule(code, ConfigLevel::Error)
    }

    /// Check if a rule is ignored (disabled).
    pub fn is_rule_ignored(&self, code: &RuleCode) -> bool {
        self.ignore_checks.iter().any(|s| code.matches_selector(s))
            || self.rules.get(code.as_str()) == Some(&ConfigLevel::Off)
    }

    /// Get the effective severity for a rule, applying any overrides.
    pub fn effective_severity(&self, code: &RuleCode, default: Severity) -> Severity {
        self.rules
            .get(code.as_str())
            .and_then(|level| level.to_severity())
            .unwrap_or(default)
    }

    /// Check if an issue should be reported based on threshold.
    pub fn should_report(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    /// Check if a file path should be excluded.
    pub fn is_excluded(&self, path: &str) -> bool {
        for pattern in &self.exclude {
            // Simple glob matching
            if pattern.contains('*') {
                let pattern_regex = regex::escape(pattern).replace("\\*", ".*");
                if let Ok(re) = regex::Regex::new(&format!("^{}$", pattern_regex))
                    && re.is_match(path)
                {
                    return true;
                }
            } else if path.contains(pattern.as_str()) {
                return true;
            }
        }
        false
    }
}

/// Builder for creating a `LintConfig` from file settings.
pub struct LintConfigBuilder {
    config: LintConfig,
}

impl LintConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LintConfig::default(),
        }
    }

    /// Apply the `[lint]` section of a configuration file.
    pub fn from_settings(mut self, settings: &LintSettings) -> Result<Self, ConfigError> {
        for (code, level) in &settings.rules {
            let level = ConfigLevel::parse(level).ok_or_else(|| ConfigError::InvalidValue {
                field: format!("lint.rules.{code}"),
                reason: format!("unknown level '{level}' (expected off, info, warn or error)"),
            })?;
            self.config.rules.insert(code.clone(), level);
        }

        self.config
            .ignore_checks
            .extend(settings.ignore_checks.iter().cloned());
        self.config.exclude.extend(settings.exclude.iter().cloned());

        if let Some(threshold) = &settings.threshold {
            self.config.threshold =
                Severity::parse(threshold).ok_or_else(|| ConfigError::InvalidValue {
                    field: "lint.threshold".to_string(),
                    reason: format!("unknown severity '{threshold}'"),
                })?;
        }

        if let Some(prefixes) = &settings.taggable_prefixes {
            self.config.taxonomy = Taxonomy::new(prefixes.iter().cloned())?;
        }

        self.config.metadata_suppressions = settings.metadata_suppressions;

        Ok(self)
    }

    /// Build the final configuration.
    pub fn build(self) -> LintConfig {
        self.config
    }
}

impl Default for LintConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert!(config.exclude.is_empty());
        assert!(config.rules.is_empty());
        assert!(config.metadata_suppressions);
        assert_eq!(config.threshold, Severity::Informational);
        assert_eq!(config.taxonomy, Taxonomy::default());
    }

    #[test]
    fn test_rule_ignored() {
        let config = LintConfig::default()
            .ignore("E90")
            .with_rule("W1000", ConfigLevel::Off);

        assert!(config.is_rule_ignored(&RuleCode::new("E9000")));
        assert!(config.is_rule_ignored(&RuleCode::new("W1000")));
        assert!(!config.is_rule_ignored(&RuleCode::new("E3012")));
    }

    #[test]
    fn test_effective_severity() {
        let config = LintConfig::default().warn("E9000").error("I1000");

        assert_eq!(
            config.effective_severity(&RuleCode::new("E9000"), Severity::Error),
            Severity::Warning
        );
        assert_eq!(
            config.effective_severity(&RuleCode::new("I1000"), Severity::Informational),
            Severity::Error
        );
        assert_eq!(
            config.effective_severity(&RuleCode::new("E3012"), Severity::Error),
            Severity::Error
        );
    }

    #[test]
    fn test_threshold() {
        let config = LintConfig::default().with_threshold(Severity::Warning);

        assert!(config.should_report(Severity::Error));
        assert!(config.should_report(Severity::Warning));
        assert!(!config.should_report(Severity::Informational));
    }

    #[test]
    fn test_exclude_patterns() {
        let config = LintConfig::default()
            .with_exclude("node_modules")
            .with_exclude("*.generated.yaml");

        assert!(config.is_excluded("path/to/node_modules/template.yaml"));
        assert!(config.is_excluded("stack.generated.yaml"));
        assert!(!config.is_excluded("stack.generatedXyaml"));
        assert!(!config.is_excluded("stack.yaml"));
    }

    #[test]
    fn test_from_settings() {
        let settings = LintSettings {
            ignore_checks: vec!["W".to_string()],
            taggable_prefixes: Some(vec!["AWS::DynamoDB::".to_string()]),
            threshold: Some("warning".to_string()),
            exclude: vec!["cdk.out".to_string()],
            metadata_suppressions: false,
            rules: HashMap::from([("E9000".to_string(), "warn".to_string())]),
        };

        let config = LintConfigBuilder::new()
            .from_settings(&settings)
            .unwrap()
            .build();

        assert_eq!(config.ignore_checks, vec!["W"]);
        assert!(config.taxonomy.is_taggable("AWS::DynamoDB::Table"));
        assert!(!config.taxonomy.is_taggable("AWS::S3::Bucket"));
        assert_eq!(config.threshold, Severity::Warning);
        assert!(config.is_excluded("cdk.out/stack.json"));
        assert!(!config.metadata_suppressions);
        assert_eq!(config.rules.get("E9000"), Some(&ConfigLevel::Warn));
    }

    #[test]
    fn test_from_settings_rejects_bad_values() {
        let bad_level = LintSettings {
            rules: HashMap::from([("E9000".to_string(), "loud".to_string())]),
            ..Default::default()
        };
        assert!(LintConfigBuilder::new().from_settings(&bad_level).is_err());

        let bad_threshold = LintSettings {
            threshold: Some("critical".to_string()),
            ..Default::default()
        };
        assert!(LintConfigBuilder::new().from_settings(&bad_threshold).is_err());

        let bad_prefix = LintSettings {
            taggable_prefixes: Some(vec![String::new()]),
            ..Default::default()
        };
        assert!(matches!(
            LintConfigBuilder::new().from_settings(&bad_prefix),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
