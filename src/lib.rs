//! # cfn-tag-lint
//!
//! A command-line linter that checks CloudFormation templates for the
//! `DataClassification` tag on storage, warehouse and database resources.
//!
//! ## Features
//!
//! - **Template Loading**: YAML and JSON templates with line/column tracking
//! - **Tag Policy**: Rule `E9000` flags taggable resources without the tag
//! - **Configurable Taxonomy**: Replace the taggable resource type prefixes
//! - **Suppressions**: Honours `cfn-lint` ignore lists in template metadata
//! - **Multiple Formats**: Pretty, parseable, JSON, GitHub Actions and JUnit
//!
//! ## Example
//!
//! ```rust,no_run
//! use cfn_tag_lint::analyzer::cfnlint::{LintConfig, OutputFormat, format_results, lint_files};
//! use std::path::PathBuf;
//!
//! let results = lint_files(&[PathBuf::from("stack.yaml")], &LintConfig::default());
//! println!("{}", format_results(&results, OutputFormat::Parseable));
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::cfnlint::{LintConfig, LintResult, lint, lint_file, lint_files};
pub use error::{CfnTagLintError, Result};
pub use handlers::*;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
