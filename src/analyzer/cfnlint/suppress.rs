//! Metadata-based rule suppression.
//!
//! CloudFormation templates disable checks through `Metadata` rather than
//! comments:
//! - Template `Metadata: {cfn-lint: {config: {ignore_checks: [E9000]}}}` -
//!   suppress rules for the whole template
//! - Resource `Metadata` with the same shape - suppress rules for findings
//!   inside that resource
//!
//! Entries match rule codes by prefix, and may be a list or a single string.

use std::collections::HashMap;

use serde_json::Value;

use crate::analyzer::cfnlint::parser::Template;
use crate::analyzer::cfnlint::types::{Finding, RuleCode};

/// Tracks which rules are suppressed, and where.
#[derive(Debug, Clone, Default)]
pub struct SuppressionState {
    /// Selectors suppressed for the entire template.
    pub template_ignored: Vec<String>,
    /// Selectors suppressed per resource logical name.
    pub resource_ignored: HashMap<String, Vec<String>>,
}

impl SuppressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no suppressions were declared.
    pub fn is_empty(&self) -> bool {
        self.template_ignored.is_empty() && self.resource_ignored.is_empty()
    }

    /// Check if a rule is suppressed, optionally inside a given resource.
    pub fn is_ignored(&self, code: &RuleCode, resource: Option<&str>) -> bool {
        if self
            .template_ignored
            .iter()
            .any(|s| code.matches_selector(s))
        {
            return true;
        }

        if let Some(name) = resource
            && let Some(selectors) = self.resource_ignored.get(name)
        {
            return selectors.iter().any(|s| code.matches_selector(s));
        }

        false
    }

    /// Check if a finding is suppressed.
    pub fn is_suppressed(&self, finding: &Finding) -> bool {
        self.is_ignored(&finding.code, finding.resource_name())
    }

    /// Suppress selectors for the whole template.
    pub fn ignore_template(&mut self, selectors: Vec<String>) {
        self.template_ignored.extend(selectors);
    }

    /// Suppress selectors for a single resource.
    pub fn ignore_resource(&mut self, name: impl Into<String>, selectors: Vec<String>) {
        if selectors.is_empty() {
            return;
        }
        self.resource_ignored
            .entry(name.into())
            .or_default()
            .extend(selectors);
    }
}

/// Extract suppressions declared in template and resource metadata.
pub fn extract_suppressions(template: &Template) -> SuppressionState {
    let mut state = SuppressionState::new();

    if let Some(metadata) = &template.metadata {
        state.ignore_template(ignore_checks(metadata));
    }

    for resource in template.resources() {
        if let Some(metadata) = &resource.metadata {
            state.ignore_resource(&resource.name, ignore_checks(metadata));
        }
    }

    state
}

/// Read `cfn-lint.config.ignore_checks` from a metadata block.
fn ignore_checks(metadata: &Value) -> Vec<String> {
    let entry = metadata
        .get("cfn-lint")
        .and_then(|c| c.get("config"))
        .and_then(|c| c.get("ignore_checks"));

    match entry {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => vec![],
    }
}
