//! Resource type taxonomy.
//!
//! Decides which resource types are subject to the tagging policy. Membership
//! is an ordered prefix scan over the configured type-name prefixes.

use crate::error::ConfigError;

/// Default taggable prefixes: the S3 family, the Redshift cluster type and
/// the RDS family.
pub const DEFAULT_TAGGABLE_PREFIXES: [&str; 3] =
    ["AWS::S3::", "AWS::Redshift::Cluster", "AWS::RDS::"];

/// Ordered set of resource type prefixes that mark a resource as taggable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    prefixes: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_TAGGABLE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Taxonomy {
    /// Build a taxonomy from explicit prefixes.
    ///
    /// An empty prefix would make every resource taggable, so it is rejected.
    pub fn new<I, S>(prefixes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "taggable_prefixes".to_string(),
                reason: "prefixes must not be empty".to_string(),
            });
        }
        Ok(Self { prefixes })
    }

    /// The configured prefixes, in scan order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// First prefix that `resource_type` starts with.
    pub fn matching_prefix(&self, resource_type: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| resource_type.starts_with(prefix.as_str()))
            .map(String::as_str)
    }

    /// Whether a resource of this type must carry the classification tag.
    pub fn is_taggable(&self, resource_type: &str) -> bool {
        self.matching_prefix(resource_type).is_some()
    }
}
