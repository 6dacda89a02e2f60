//! E9000: data-classification-tag
//!
//! Taggable resources (by type prefix) must carry a `DataClassification` tag.
//! Only the list-of-records tag form is checked; tags written as a mapping,
//! a scalar or an intrinsic function cannot be verified and are left alone.

use log::{debug, trace};
use serde_json::Value;

use crate::analyzer::cfnlint::parser::{Resource, TagsValue};
use crate::analyzer::cfnlint::rules::{LintContext, Rule};
use crate::analyzer::cfnlint::taxonomy::Taxonomy;
use crate::analyzer::cfnlint::types::{Finding, RuleCode, RuleMeta};

pub const CODE: &str = "E9000";
const NAME: &str = "data-classification-tag";
const SHORT_DESCRIPTION: &str = "Resource has DataClassification Tag";
const DESCRIPTION: &str = "Check that resources have a DataClassification tag";
const TAGS: [&str; 2] = ["resources", "tags"];

/// Tag key every taggable resource must declare.
pub const REQUIRED_TAG_KEY: &str = "DataClassification";

/// Flags taggable resources whose tag list lacks the classification key.
#[derive(Debug, Clone)]
pub struct DataClassificationTagRule {
    code: RuleCode,
    meta: RuleMeta,
    taxonomy: Taxonomy,
}

impl Default for DataClassificationTagRule {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}

impl DataClassificationTagRule {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            code: RuleCode::new(CODE),
            meta: RuleMeta::new(SHORT_DESCRIPTION, DESCRIPTION, &TAGS),
            taxonomy,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Check an ordered resource map.
    pub fn match_resources(&self, resources: &[Resource]) -> Vec<Finding> {
        resources
            .iter()
            .filter_map(|resource| self.check_resource(resource))
            .collect()
    }

    fn check_resource(&self, resource: &Resource) -> Option<Finding> {
        let resource_type = resource.type_name();
        if !self.taxonomy.is_taggable(resource_type) {
            trace!(
                "{}: {} ({:?}) is not taggable",
                CODE, resource.name, resource_type
            );
            return None;
        }

        let tags: &[Value] = match resource.tags() {
            TagsValue::Absent => &[],
            TagsValue::Sequence(items) => items,
            TagsValue::Mapping(_) | TagsValue::Other(_) => {
                debug!(
                    "{}: tags of {} are not a list, skipping",
                    CODE, resource.name
                );
                return None;
            }
        };

        if tags.iter().any(is_classification_tag) {
            return None;
        }

        let (line, column) = resource
            .tags_position
            .or(resource.position)
            .map(|p| (p.line, p.column))
            .unwrap_or((1, 1));

        let message = format!(
            "Resource {} does not have required {} tag",
            resource.name, REQUIRED_TAG_KEY
        );

        Some(
            Finding::new(
                self.code.clone(),
                NAME,
                self.severity(),
                message,
                vec![
                    "Resources".to_string(),
                    resource.name.clone(),
                    "Properties".to_string(),
                    "Tags".to_string(),
                ],
            )
            .at(line, column),
        )
    }
}

impl Rule for DataClassificationTagRule {
    fn code(&self) -> &RuleCode {
        &self.code
    }

    fn name(&self) -> &str {
        NAME
    }

    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, context: &LintContext) -> Vec<Finding> {
        self.match_resources(context.template.resources())
    }
}

/// Whether a tag list element is a `{Key: DataClassification}` record.
fn is_classification_tag(tag: &Value) -> bool {
    tag.as_object()
        .and_then(|record| record.get("Key"))
        .and_then(Value::as_str)
        == Some(REQUIRED_TAG_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::cfnlint::parser::parse_template;
    use crate::analyzer::cfnlint::types::Severity;

    fn check_yaml(yaml: &str) -> Vec<Finding> {
        check_yaml_with(yaml, Taxonomy::default())
    }

    fn check_yaml_with(yaml: &str, taxonomy: Taxonomy) -> Vec<Finding> {
        let template = parse_template(yaml).unwrap();
        let ctx = LintContext::new(&template, "template.yaml");
        DataClassificationTagRule::new(taxonomy).check(&ctx)
    }

    fn tags_path(name: &str) -> Vec<String> {
        vec![
            "Resources".to_string(),
            name.to_string(),
            "Properties".to_string(),
            "Tags".to_string(),
        ]
    }

    #[test]
    fn test_violation_no_properties() {
        let yaml = r#"
Resources:
  Bucket1:
    Type: AWS::S3::Bucket
"#;
        let findings = check_yaml(yaml);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path, tags_path("Bucket1"));
        assert_eq!(findings[0].code.as_str(), "E9000");
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(
            findings[0].message,
            "Resource Bucket1 does not have required DataClassification tag"
        );
        // No Tags key, so the finding points at the resource itself.
        assert_eq!((findings[0].line, findings[0].column), (3, 3));
    }

    #[test]
    fn test_no_violation_tag_present() {
        let yaml = r#"
Resources:
  Bucket1:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: Name
          Value: x
        - Key: DataClassification
          Value: PII
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_no_violation_not_taggable() {
        let yaml = r#"
Resources:
  Instance:
    Type: AWS::EC2::Instance
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_only_untagged_resource_reported() {
        let yaml = r#"
Resources:
  Untagged:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: Team
          Value: data
  Tagged:
    Type: AWS::Redshift::Cluster
    Properties:
      Tags:
        - Key: DataClassification
          Value: Internal
"#;
        let findings = check_yaml(yaml);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].resource_name(), Some("Untagged"));
        assert!(findings[0].message.starts_with("Resource Untagged "));
        // Points at the Tags key.
        assert_eq!((findings[0].line, findings[0].column), (6, 7));
    }

    #[test]
    fn test_mapping_tags_skipped() {
        let yaml = r#"
Resources:
  Database:
    Type: AWS::RDS::DBInstance
    Properties:
      Tags:
        DataClassification: Public
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_non_list_tags_skipped() {
        let yaml = r#"
Resources:
  RefTags:
    Type: AWS::S3::Bucket
    Properties:
      Tags: !Ref SharedTags
  ConditionalTags:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        Fn::If: [IsProd, [], []]
  NullTags:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
  ScalarProperties:
    Type: AWS::S3::Bucket
    Properties: not-a-mapping
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_short_form_intrinsic_tags_skipped() {
        let yaml = r#"
Resources:
  ShortIf:
    Type: AWS::S3::Bucket
    Properties:
      Tags: !If
        - IsProd
        - - Key: DataClassification
            Value: Restricted
        - - Key: DataClassification
            Value: Internal
  LongIf:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        Fn::If:
          - IsProd
          - - Key: DataClassification
              Value: Restricted
          - []
  Split:
    Type: AWS::RDS::DBInstance
    Properties:
      Tags: !Split [",", !ImportValue SharedTags]
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_short_form_key_is_not_the_literal_key() {
        let yaml = r#"
Resources:
  SubKey:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: !Sub DataClassification
          Value: x
"#;
        let findings = check_yaml(yaml);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].resource_name(), Some("SubKey"));
    }

    #[test]
    fn test_empty_list_and_empty_properties_flagged() {
        let yaml = r#"
Resources:
  EmptyList:
    Type: AWS::RDS::DBCluster
    Properties:
      Tags: []
  EmptyProperties:
    Type: AWS::RDS::DBCluster
    Properties: {}
  NullProperties:
    Type: AWS::RDS::DBCluster
    Properties:
"#;
        let findings = check_yaml(yaml);
        let names: Vec<&str> = findings.iter().filter_map(|f| f.resource_name()).collect();
        assert_eq!(names, vec!["EmptyList", "EmptyProperties", "NullProperties"]);
    }

    #[test]
    fn test_key_comparison_is_exact() {
        let yaml = r#"
Resources:
  Lowercase:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: dataclassification
          Value: PII
  Padded:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: "DataClassification "
          Value: PII
  WrongField:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - key: DataClassification
          Value: PII
        - DataClassification
"#;
        assert_eq!(check_yaml(yaml).len(), 3);
    }

    #[test]
    fn test_value_not_inspected() {
        let yaml = r#"
Resources:
  EmptyValue:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: DataClassification
          Value: ""
  NoValue:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: DataClassification
  RefValue:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: DataClassification
          Value: !Ref Classification
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_missing_type_skipped() {
        let yaml = r#"
Resources:
  Untyped:
    Properties:
      Tags: []
"#;
        assert!(check_yaml(yaml).is_empty());
    }

    #[test]
    fn test_findings_follow_document_order() {
        let yaml = r#"
Resources:
  Zulu:
    Type: AWS::S3::Bucket
  Alpha:
    Type: AWS::RDS::DBInstance
  Mike:
    Type: AWS::Redshift::Cluster
"#;
        let findings = check_yaml(yaml);
        let names: Vec<&str> = findings.iter().filter_map(|f| f.resource_name()).collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Mike"]);
        assert_eq!(findings, check_yaml(yaml));
    }

    #[test]
    fn test_injected_taxonomy() {
        let taxonomy = Taxonomy::new([
            "Namespace::Storage::",
            "Namespace::DataWarehouse::Cluster",
            "Namespace::RelationalDB::",
        ])
        .unwrap();
        let yaml = r#"
Resources:
  Bucket1:
    Type: Namespace::Storage::Bucket
  Compute:
    Type: Namespace::Compute::Instance
  Database:
    Type: Namespace::RelationalDB::Instance
    Properties:
      Tags:
        DataClassification: Public
  Warehouse:
    Type: Namespace::DataWarehouse::Cluster
    Properties:
      Tags:
        - Key: DataClassification
          Value: Confidential
  Legacy:
    Type: AWS::S3::Bucket
"#;
        let findings = check_yaml_with(yaml, taxonomy);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path, tags_path("Bucket1"));
    }

    #[test]
    fn test_json_template() {
        let json = r#"{
  "Resources": {
    "Bucket": {
      "Type": "AWS::S3::Bucket",
      "Properties": {
        "Tags": [{ "Key": "Owner", "Value": "me" }]
      }
    }
  }
}"#;
        let findings = check_yaml(json);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 6);
    }

    #[test]
    fn test_rule_identity() {
        let rule = DataClassificationTagRule::default();
        assert_eq!(rule.code().as_str(), CODE);
        assert_eq!(rule.name(), NAME);
        assert_eq!(rule.meta().description, DESCRIPTION);
        assert_eq!(rule.taxonomy(), &Taxonomy::default());
    }
}
