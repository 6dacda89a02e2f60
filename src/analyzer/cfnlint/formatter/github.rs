//! GitHub Actions output formatter.
//!
//! Produces output in GitHub Actions workflow command format:
//! ::error file={name},line={line},col={col},title={rule}::{message}

use crate::analyzer::cfnlint::formatter::PARSE_ERROR_CODE;
use crate::analyzer::cfnlint::lint::LintResult;
use crate::analyzer::cfnlint::types::Severity;

/// Format lint results for GitHub Actions.
pub fn format(results: &[LintResult]) -> String {
    let mut output = String::new();

    for result in results {
        for err in &result.parse_errors {
            output.push_str(&format!(
                "::error file={},line=1,col=1,title={}::{}\n",
                escape_property(&result.file_path),
                PARSE_ERROR_CODE,
                escape_data(err)
            ));
        }

        for finding in &result.findings {
            let level = match finding.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Informational => "notice",
            };

            output.push_str(&format!(
                "::{} file={},line={},col={},title={}::{}\n",
                level,
                escape_property(&result.file_path),
                finding.line,
                finding.column,
                finding.code,
                escape_data(&finding.message)
            ));
        }
    }

    output
}

/// Escape the message part of a workflow command.
fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a `key=value` property of a workflow command.
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
