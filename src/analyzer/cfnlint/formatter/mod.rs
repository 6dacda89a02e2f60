//! Output formatters for lint results.
//!
//! - Pretty - Colored terminal output (default)
//! - Parseable - One `file:line:col:endline:endcol:rule:message` line per issue
//! - JSON - cfn-lint compatible JSON
//! - GitHub - GitHub Actions annotations
//! - JUnit - JUnit XML format
//!
//! Parse and read errors are reported under rule `E0000`.

pub mod github;
pub mod json;
pub mod pretty;

use crate::analyzer::cfnlint::lint::LintResult;

/// Rule code used to report templates that could not be parsed or read.
pub const PARSE_ERROR_CODE: &str = "E0000";

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Colored terminal output
    #[default]
    Pretty,
    /// One line per issue, for editors and scripts
    Parseable,
    /// JSON format for machine processing
    Json,
    /// GitHub Actions annotations
    GitHub,
    /// JUnit XML format
    JUnit,
}

impl OutputFormat {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "stylish" => Some(Self::Pretty),
            "parseable" | "compact" => Some(Self::Parseable),
            "json" => Some(Self::Json),
            "github" | "github-actions" => Some(Self::GitHub),
            "junit" => Some(Self::JUnit),
            _ => None,
        }
    }
}

/// Format lint results in the requested format.
pub fn format_results(results: &[LintResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(results),
        OutputFormat::Parseable => format_parseable(results),
        OutputFormat::Json => json::format(results),
        OutputFormat::GitHub => github::format(results),
        OutputFormat::JUnit => format_junit(results),
    }
}

/// Format a single result.
pub fn format_result(result: &LintResult, format: OutputFormat) -> String {
    format_results(std::slice::from_ref(result), format)
}

/// Parseable format (one line per issue).
fn format_parseable(results: &[LintResult]) -> String {
    let mut output = String::new();

    for result in results {
        for err in &result.parse_errors {
            output.push_str(&format!(
                "{}:1:1:1:1:{}:{}\n",
                result.file_path,
                PARSE_ERROR_CODE,
                single_line(err)
            ));
        }

        for finding in &result.findings {
            output.push_str(&format!(
                "{}:{}:{}:{}:{}:{}:{}\n",
                result.file_path,
                finding.line,
                finding.column,
                finding.line,
                finding.column,
                finding.code,
                single_line(&finding.message)
            ));
        }
    }

    output
}

/// JUnit XML format.
fn format_junit(results: &[LintResult]) -> String {
    let mut output = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    output.push('\n');

    let issue_count = |r: &LintResult| r.findings.len() + r.parse_errors.len();
    let total_tests: usize = results.iter().map(|r| issue_count(r).max(1)).sum();
    let total_failures: usize = results.iter().map(issue_count).sum();

    output.push_str(&format!(
        r#"<testsuite name="cfn-tag-lint" tests="{}" failures="{}">"#,
        total_tests, total_failures
    ));
    output.push('\n');

    for result in results {
        let file = escape_xml(&result.file_path);

        if issue_count(result) == 0 {
            output.push_str(&format!(
                r#"  <testcase name="{}" classname="cfn-tag-lint"/>"#,
                file
            ));
            output.push('\n');
            continue;
        }

        for err in &result.parse_errors {
            output.push_str(&format!(
                r#"  <testcase name="{}:1" classname="cfn-tag-lint.{}">"#,
                file, PARSE_ERROR_CODE
            ));
            output.push('\n');
            output.push_str(&format!(
                r#"    <failure message="{}" type="error"/>"#,
                escape_xml(err)
            ));
            output.push_str("\n  </testcase>\n");
        }

        for finding in &result.findings {
            output.push_str(&format!(
                r#"  <testcase name="{}:{}" classname="cfn-tag-lint.{}">"#,
                file, finding.line, finding.code
            ));
            output.push('\n');
            output.push_str(&format!(
                r#"    <failure message="{}" type="{}"/>"#,
                escape_xml(&finding.message),
                finding.severity
            ));
            output.push_str("\n  </testcase>\n");
        }
    }

    output.push_str("</testsuite>\n");
    output
}

fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::cfnlint::types::{Finding, Severity};

    fn make_result() -> LintResult {
        let mut result = LintResult::new("template.yaml");
        result.findings.push(
            Finding::new(
                "E9000",
                "data-classification-tag",
                Severity::Error,
                "Resource Bucket does not have required DataClassification tag",
                vec![
                    "Resources".into(),
                    "Bucket".into(),
                    "Properties".into(),
                    "Tags".into(),
                ],
            )
            .at(6, 7),
        );
        result.error_count = 1;
        result
    }

    #[test]
    fn test_parseable_format() {
        let output = format_parseable(&[make_result()]);
        assert_eq!(
            output,
            "template.yaml:6:7:6:7:E9000:Resource Bucket does not have required DataClassification tag\n"
        );
    }

    #[test]
    fn test_parseable_parse_error() {
        let mut result = LintResult::new("broken.yaml");
        result.parse_errors.push("YAML parse error:\nbad".to_string());
        let output = format_parseable(&[result]);
        assert_eq!(output, "broken.yaml:1:1:1:1:E0000:YAML parse error: bad\n");
    }

    #[test]
    fn test_junit_format() {
        let clean = LintResult::new("clean.yaml");
        let output = format_junit(&[make_result(), clean]);
        assert!(output.contains("<?xml"));
        assert!(output.contains(r#"tests="2" failures="1""#));
        assert!(output.contains("cfn-tag-lint.E9000"));
        assert!(output.contains(r#"<testcase name="clean.yaml" classname="cfn-tag-lint"/>"#));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("pretty"), Some(OutputFormat::Pretty));
        assert_eq!(
            OutputFormat::parse("parseable"),
            Some(OutputFormat::Parseable)
        );
        assert_eq!(OutputFormat::parse("github"), Some(OutputFormat::GitHub));
        assert_eq!(OutputFormat::parse("sarif"), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}
