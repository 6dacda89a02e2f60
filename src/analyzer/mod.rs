//! # Analyzer Module
//!
//! Template analysis. Currently hosts the native CloudFormation
//! data classification linter.

pub mod cfnlint;
