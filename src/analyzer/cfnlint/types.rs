//! Core types for the CloudFormation tag linter.
//!
//! - `Severity` - Finding severity levels
//! - `RuleCode` - Rule identifiers (e.g., "E9000")
//! - `Finding` - A single rule violation with its document path
//! - `RuleMeta` - Static rule identity for listings and reports

use std::cmp::Ordering;
use std::fmt;

/// Severity levels for rule violations.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Informational`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The template violates a required policy
    Error,
    /// The template should usually be changed
    Warning,
    /// Informational suggestions
    Informational,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" | "e" => Some(Self::Error),
            "warning" | "warn" | "w" => Some(Self::Warning),
            "informational" | "info" | "i" => Some(Self::Informational),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Informational => "informational",
        }
    }

    /// Level name used in cfn-lint style reports.
    pub fn level(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Informational => "Informational",
        }
    }

    /// Exit code bit contributed by findings of this severity.
    pub fn exit_bit(&self) -> i32 {
        match self {
            Self::Error => 2,
            Self::Warning => 4,
            Self::Informational => 8,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
            Self::Informational => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Error
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rule code identifier (e.g., "E9000").
///
/// The leading letter carries the default severity, following the
/// cfn-lint numbering scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleCode(pub String);

impl RuleCode {
    /// Create a new rule code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Severity implied by the code prefix.
    pub fn default_severity(&self) -> Severity {
        match self.0.chars().next() {
            Some('W') => Severity::Warning,
            Some('I') => Severity::Informational,
            _ => Severity::Error,
        }
    }

    /// Get the numeric part of the rule code.
    pub fn number(&self) -> Option<u32> {
        self.0.get(1..).and_then(|n| n.parse().ok())
    }

    /// Whether this code is selected by an `ignore_checks` style entry.
    ///
    /// Entries match by prefix, so `E9` selects `E9000`.
    pub fn matches_selector(&self, selector: &str) -> bool {
        !selector.is_empty() && self.0.starts_with(selector)
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RuleCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A rule violation found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The rule code that was violated.
    pub code: RuleCode,
    /// The human-readable rule name.
    pub rule_name: String,
    /// The severity of the violation.
    pub severity: Severity,
    /// A human-readable message describing the violation.
    pub message: String,
    /// Path of the violation inside the document,
    /// e.g. `["Resources", "Bucket", "Properties", "Tags"]`.
    pub path: Vec<String>,
    /// The line number where the violation occurred (1-indexed).
    pub line: u32,
    /// The column number where the violation starts (1-indexed).
    pub column: u32,
}

impl Finding {
    /// Create a new finding positioned at `1:1`.
    pub fn new(
        code: impl Into<RuleCode>,
        rule_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        path: Vec<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule_name: rule_name.into(),
            severity,
            message: message.into(),
            path,
            line: 1,
            column: 1,
        }
    }

    /// Set the source position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Logical name of the resource this finding points into, if any.
    pub fn resource_name(&self) -> Option<&str> {
        match self.path.as_slice() {
            [root, name, ..] if root == "Resources" => Some(name.as_str()),
            _ => None,
        }
    }

    /// The path rendered as `Resources/Bucket/Properties/Tags`.
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }
}

/// Rule metadata for documentation and display.
#[derive(Debug, Clone)]
pub struct RuleMeta {
    /// One-line description of what the rule checks.
    pub short_description: String,
    /// Longer description.
    pub description: String,
    /// Category tags (e.g. "resources", "tags").
    pub tags: Vec<String>,
}

impl RuleMeta {
    pub fn new(
        short_description: impl Into<String>,
        description: impl Into<String>,
        tags: &[&str],
    ) -> Self {
        Self {
            short_description: short_description.into(),
            description: description.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Configuration level for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// Rule is disabled
    Off,
    /// Rule produces informational findings
    Info,
    /// Rule produces warnings
    Warn,
    /// Rule produces errors
    Error,
}

impl ConfigLevel {
    /// Parse a level name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(Self::Off),
            "info" | "informational" => Some(Self::Info),
            "warn" | "warning" | "1" => Some(Self::Warn),
            "error" | "2" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to severity (for non-off levels).
    pub fn to_severity(&self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Info => Some(Severity::Informational),
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

impl Default for ConfigLevel {
    fn default() -> Self {
        Self::Error
    }
}
