//! Pretty (colored terminal) output formatter.

use colored::Colorize;

use crate::analyzer::cfnlint::formatter::PARSE_ERROR_CODE;
use crate::analyzer::cfnlint::lint::LintResult;
use crate::analyzer::cfnlint::types::Severity;

/// Format lint results grouped per file, with a summary line.
pub fn format(results: &[LintResult]) -> String {
    let mut output = String::new();
    let mut total_errors = 0;
    let mut total_warnings = 0;
    let mut total_info = 0;

    for result in results {
        if result.findings.is_empty() && result.parse_errors.is_empty() {
            continue;
        }

        output.push_str(&format!("\n{}\n", result.file_path.bold().underline()));

        for err in &result.parse_errors {
            output.push_str(&format!(
                "  1:1  {}  {}  {}\n",
                "error".red(),
                err,
                PARSE_ERROR_CODE.dimmed()
            ));
            total_errors += 1;
        }

        for finding in &result.findings {
            let severity = match finding.severity {
                Severity::Error => finding.severity.as_str().red(),
                Severity::Warning => finding.severity.as_str().yellow(),
                Severity::Informational => finding.severity.as_str().blue(),
            };

            output.push_str(&format!(
                "  {}:{}  {}  {}  {}\n",
                finding.line,
                finding.column,
                severity,
                finding.message,
                finding.code.as_str().dimmed()
            ));

            match finding.severity {
                Severity::Error => total_errors += 1,
                Severity::Warning => total_warnings += 1,
                Severity::Informational => total_info += 1,
            }
        }
    }

    let total = total_errors + total_warnings + total_info;
    if total > 0 {
        let mut parts = Vec::new();
        if total_errors > 0 {
            parts.push(plural(total_errors, "error", "errors"));
        }
        if total_warnings > 0 {
            parts.push(plural(total_warnings, "warning", "warnings"));
        }
        if total_info > 0 {
            parts.push(format!("{} informational", total_info));
        }

        let summary = format!(
            "{} ({})",
            plural(total, "problem", "problems"),
            parts.join(", ")
        );
        let summary = if total_errors > 0 {
            summary.red().bold()
        } else {
            summary.yellow().bold()
        };
        output.push_str(&format!("\n  {}\n", summary));
    }

    output
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}
