//! Rule system framework for the template linter.
//!
//! Provides the infrastructure for defining and running template rules:
//! - `Rule` trait implemented by every rule
//! - `LintContext` handed to each rule
//! - `all_rules` building the rule set for a lint run

use crate::analyzer::cfnlint::config::LintConfig;
use crate::analyzer::cfnlint::parser::Template;
use crate::analyzer::cfnlint::types::{Finding, RuleCode, RuleMeta, Severity};

// Rule modules
pub mod e9000;

/// Context for linting a template.
#[derive(Debug, Clone)]
pub struct LintContext<'a> {
    /// The parsed template.
    pub template: &'a Template,
    /// The file path (for error messages).
    pub path: &'a str,
}

impl<'a> LintContext<'a> {
    pub fn new(template: &'a Template, path: &'a str) -> Self {
        Self { template, path }
    }
}

/// A rule that can check CloudFormation templates.
///
/// Rules hold no mutable state; one instance may check any number of
/// templates, from any thread.
pub trait Rule: Send + Sync {
    /// Get the rule code (e.g., "E9000").
    fn code(&self) -> &RuleCode;

    /// Get the human-readable rule name.
    fn name(&self) -> &str;

    /// Get the default severity.
    fn severity(&self) -> Severity {
        self.code().default_severity()
    }

    /// Get the rule metadata (descriptions, tags).
    fn meta(&self) -> &RuleMeta;

    /// Check the template and return any findings, in document order.
    fn check(&self, context: &LintContext) -> Vec<Finding>;
}

/// Build the rules for a lint run.
pub fn all_rules(config: &LintConfig) -> Vec<Box<dyn Rule>> {
    vec![Box::new(e9000::DataClassificationTagRule::new(
        config.taxonomy.clone(),
    ))]
}

/// Get rule definitions for documentation.
pub fn rule_definitions(config: &LintConfig) -> Vec<RuleDefinition> {
    all_rules(config)
        .iter()
        .map(|r| RuleDefinition {
            code: r.code().clone(),
            name: r.name().to_string(),
            severity: r.severity(),
            short_description: r.meta().short_description.clone(),
            description: r.meta().description.clone(),
            tags: r.meta().tags.clone(),
        })
        .collect()
}

/// Rule definition for documentation/introspection.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    pub code: RuleCode,
    pub name: String,
    pub severity: Severity,
    pub short_description: String,
    pub description: String,
    pub tags: Vec<String>,
}
