//! JSON output formatter, in the shape cfn-lint emits.

use std::collections::HashMap;

use serde_json::json;

use crate::analyzer::cfnlint::config::LintConfig;
use crate::analyzer::cfnlint::formatter::PARSE_ERROR_CODE;
use crate::analyzer::cfnlint::lint::LintResult;
use crate::analyzer::cfnlint::rules::{RuleDefinition, rule_definitions};

/// Format lint results as a flat JSON array of matches.
pub fn format(results: &[LintResult]) -> String {
    let definitions: HashMap<String, RuleDefinition> = rule_definitions(&LintConfig::default())
        .into_iter()
        .map(|d| (d.code.to_string(), d))
        .collect();

    let mut matches: Vec<serde_json::Value> = Vec::new();

    for result in results {
        for err in &result.parse_errors {
            matches.push(json!({
                "Filename": result.file_path,
                "Level": "Error",
                "Location": location(1, 1, &[]),
                "Message": err,
                "Rule": {
                    "Id": PARSE_ERROR_CODE,
                    "ShortDescription": "Template parse error",
                    "Description": "Errors found when loading the template",
                }
            }));
        }

        for f in &result.findings {
            let definition = definitions.get(f.code.as_str());
            matches.push(json!({
                "Filename": result.file_path,
                "Level": f.severity.level(),
                "Location": location(f.line, f.column, &f.path),
                "Message": f.message,
                "Rule": {
                    "Id": f.code.as_str(),
                    "Name": f.rule_name,
                    "ShortDescription": definition.map(|d| d.short_description.as_str()),
                    "Description": definition.map(|d| d.description.as_str()),
                }
            }));
        }
    }

    serde_json::to_string_pretty(&matches).unwrap_or_else(|_| "[]".to_string())
}

fn location(line: u32, column: u32, path: &[String]) -> serde_json::Value {
    json!({
        "Start": { "LineNumber": line, "ColumnNumber": column },
        "End": { "LineNumber": line, "ColumnNumber": column },
        "Path": path,
    })
}
