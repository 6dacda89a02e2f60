//! Native CloudFormation data classification linter.
//!
//! Checks that every resource whose type falls inside the taggable taxonomy
//! carries a `DataClassification` entry in its `Tags` list, and reports the
//! ones that don't under rule `E9000`.
//!
//! # Features
//!
//! - YAML and JSON template loading with position tracking
//! - Configurable taxonomy of taggable resource type prefixes
//! - Per-rule severity overrides, ignore lists and a reporting threshold
//! - `cfn-lint` style metadata suppressions at template and resource level
//! - Multiple output formats (Pretty, Parseable, JSON, GitHub Actions, JUnit)
//!
//! # Example
//!
//! ```rust,ignore
//! use cfn_tag_lint::analyzer::cfnlint::{lint, LintConfig};
//!
//! let template = r#"
//! Resources:
//!   Bucket:
//!     Type: AWS::S3::Bucket
//! "#;
//!
//! let result = lint(template, &LintConfig::default());
//!
//! for finding in result.findings {
//!     println!("{}: {} - {}", finding.line, finding.code, finding.message);
//! }
//! ```
//!
//! # Rules
//!
//! | Code  | Name                    | Description                                           |
//! |-------|-------------------------|-------------------------------------------------------|
//! | E9000 | data-classification-tag | Check that resources have a DataClassification tag    |

pub mod config;
pub mod formatter;
pub mod lint;
pub mod parser;
pub mod rules;
pub mod suppress;
pub mod taxonomy;
pub mod types;

// Re-export main types and functions
pub use config::{LintConfig, LintConfigBuilder};
pub use formatter::{OutputFormat, format_result, format_results};
pub use lint::{
    LintResult, exit_code, lint, lint_file, lint_files, lint_template, lint_with_path,
};
pub use parser::{Resource, TagsValue, Template, parse_template};
pub use rules::{Rule, RuleDefinition, all_rules, rule_definitions};
pub use taxonomy::{DEFAULT_TAGGABLE_PREFIXES, Taxonomy};
pub use types::{ConfigLevel, Finding, RuleCode, RuleMeta, Severity};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_basic() {
        let yaml = r#"
Resources:
  Bucket:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: DataClassification
          Value: Confidential
"#;
        let result = lint(yaml, &LintConfig::default());
        assert!(result.parse_errors.is_empty());
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_lint_with_errors() {
        let yaml = r#"
Resources:
  Warehouse:
    Type: AWS::Redshift::Cluster
"#;
        let result = lint(yaml, &LintConfig::default());
        assert!(result.parse_errors.is_empty());
        assert!(result.findings.iter().any(|f| f.code.as_str() == "E9000"));
    }

    #[test]
    fn test_config_ignore() {
        let yaml = r#"
Resources:
  Warehouse:
    Type: AWS::Redshift::Cluster
"#;
        let config = LintConfig::default().ignore("E9");
        let result = lint(yaml, &config);
        assert!(!result.findings.iter().any(|f| f.code.as_str() == "E9000"));
    }

    #[test]
    fn test_format_json() {
        let yaml = r#"
Resources:
  Database:
    Type: AWS::RDS::DBInstance
"#;
        let result = lint(yaml, &LintConfig::default());
        let output = format_result(&result, OutputFormat::Json);
        assert!(output.contains("\"Filename\""));
        assert!(output.contains("Resource Database does not have required DataClassification tag"));
    }
}
