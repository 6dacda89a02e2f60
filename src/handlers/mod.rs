// Handler modules
pub mod lint;

// Re-export all handler functions
pub use lint::{LintOptions, collect_templates, format_rule_list, handle_lint};
