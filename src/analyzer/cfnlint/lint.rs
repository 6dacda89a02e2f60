//! Main linting orchestration.
//!
//! Ties together parsing, rules, configuration and metadata suppressions to
//! provide the main linting API.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use crate::analyzer::cfnlint::config::LintConfig;
use crate::analyzer::cfnlint::parser::{Template, parse_template};
use crate::analyzer::cfnlint::rules::{LintContext, all_rules};
use crate::analyzer::cfnlint::suppress::{SuppressionState, extract_suppressions};
use crate::analyzer::cfnlint::types::{Finding, Severity};

/// Result of linting a CloudFormation template.
#[derive(Debug, Clone)]
pub struct LintResult {
    /// The file path that was linted.
    pub file_path: String,
    /// Rule violations found, in document order.
    pub findings: Vec<Finding>,
    /// Parse or read errors (if any).
    pub parse_errors: Vec<String>,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Number of informational findings.
    pub info_count: usize,
}

impl LintResult {
    /// Create a new empty result.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            findings: Vec::new(),
            parse_errors: Vec::new(),
            error_count: 0,
            warning_count: 0,
            info_count: 0,
        }
    }

    /// Update counts based on findings.
    fn update_counts(&mut self) {
        self.error_count = count_severity(&self.findings, Severity::Error);
        self.warning_count = count_severity(&self.findings, Severity::Warning);
        self.info_count = count_severity(&self.findings, Severity::Informational);
    }

    /// Check if there are any findings.
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Check if there are any errors (error findings or parse errors).
    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || !self.parse_errors.is_empty()
    }

    /// Get the maximum severity in the results.
    pub fn max_severity(&self) -> Option<Severity> {
        if !self.parse_errors.is_empty() {
            return Some(Severity::Error);
        }
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Check if the results reach a severity threshold.
    pub fn should_fail(&self, threshold: Severity) -> bool {
        self.max_severity().is_some_and(|max| max >= threshold)
    }

    /// Process exit code: 2 for errors, 4 for warnings, 8 for
    /// informational findings, combined bitwise.
    pub fn exit_code(&self) -> i32 {
        let mut code = if self.parse_errors.is_empty() { 0 } else { 2 };
        for finding in &self.findings {
            code |= finding.severity.exit_bit();
        }
        code
    }
}

fn count_severity(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

/// Combined exit code for several results.
pub fn exit_code(results: &[LintResult]) -> i32 {
    results.iter().fold(0, |code, r| code | r.exit_code())
}

/// Lint a template string.
pub fn lint(content: &str, config: &LintConfig) -> LintResult {
    lint_with_path(content, "<inline>", config)
}

/// Lint a template string with a path for error messages.
pub fn lint_with_path(content: &str, path: &str, config: &LintConfig) -> LintResult {
    let mut result = LintResult::new(path);

    let template = match parse_template(content) {
        Ok(t) => t,
        Err(err) => {
            debug!("{}: {}", path, err);
            result.parse_errors.push(err.to_string());
            return result;
        }
    };

    result.findings = lint_template(&template, path, config);
    result.update_counts();

    result
}

/// Lint an already parsed template.
pub fn lint_template(template: &Template, path: &str, config: &LintConfig) -> Vec<Finding> {
    let suppressions = if config.metadata_suppressions {
        extract_suppressions(template)
    } else {
        SuppressionState::new()
    };

    run_rules(template, path, config)
        .into_iter()
        .filter(|f| !config.is_rule_ignored(&f.code))
        .filter(|f| !suppressions.is_suppressed(f))
        .map(|mut f| {
            f.severity = config.effective_severity(&f.code, f.severity);
            f
        })
        .filter(|f| config.should_report(f.severity))
        .collect()
}

/// Lint a template from a file path.
pub fn lint_file(path: &Path, config: &LintConfig) -> LintResult {
    let path_str = path.display().to_string();

    if config.is_excluded(&path_str) {
        debug!("Skipping excluded template {}", path_str);
        return LintResult::new(path_str);
    }

    match std::fs::read_to_string(path) {
        Ok(content) => lint_with_path(&content, &path_str, config),
        Err(err) => {
            let mut result = LintResult::new(path_str);
            result
                .parse_errors
                .push(format!("Failed to read file: {}", err));
            result
        }
    }
}

/// Lint several templates in parallel. Results keep the input order.
pub fn lint_files(paths: &[PathBuf], config: &LintConfig) -> Vec<LintResult> {
    info!("Linting {} template(s)", paths.len());
    paths
        .par_iter()
        .map(|path| lint_file(path, config))
        .collect()
}

/// Run all enabled rules on the template.
fn run_rules(template: &Template, path: &str, config: &LintConfig) -> Vec<Finding> {
    let ctx = LintContext::new(template, path);
    let mut all_findings = Vec::new();

    for rule in all_rules(config) {
        if config.is_rule_ignored(rule.code()) {
            debug!("Rule {} disabled by configuration", rule.code());
            continue;
        }

        let findings = rule.check(&ctx);
        debug!("{}: {} reported {} finding(s)", path, rule.code(), findings.len());
        all_findings.extend(findings);
    }

    all_findings
}
