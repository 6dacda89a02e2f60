//! YAML loader that understands CloudFormation short-form intrinsics.
//!
//! Builds a `serde_json::Value` tree straight from yaml-rust2 parser events,
//! so node tags survive: `!Ref X` becomes `{"Ref": "X"}`, `!GetAtt A.B`
//! becomes `{"Fn::GetAtt": ["A", "B"]}` and any other `!Name` becomes
//! `{"Fn::Name": ...}`, the same objects the long form produces.

use std::collections::HashMap;

use serde_json::{Map, Value};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};
use yaml_rust2::Yaml;

use super::ParseError;

/// Handle yaml-rust2 reports for the `!!` core schema tags.
const CORE_SCHEMA_HANDLE: &str = "tag:yaml.org,2002:";

/// Load every document of a YAML stream.
pub fn load_documents(content: &str) -> Result<Vec<Value>, ParseError> {
    let mut loader = CfnYamlLoader::default();
    Parser::new_from_str(content)
        .load(&mut loader, true)
        .map_err(|e| ParseError::YamlError(e.to_string()))?;

    match loader.error {
        Some(e) => Err(ParseError::YamlError(e.to_string())),
        None => Ok(loader.docs),
    }
}

/// Map a short-form tag name to the intrinsic function key it stands for.
pub fn intrinsic_key(tag_name: &str) -> String {
    match tag_name {
        "Ref" | "Condition" => tag_name.to_string(),
        _ => format!("Fn::{tag_name}"),
    }
}

/// A node under construction.
enum Frame {
    Sequence {
        items: Vec<Value>,
        anchor: usize,
        tag: Option<Tag>,
    },
    Mapping {
        map: Map<String, Value>,
        key: PendingKey,
        anchor: usize,
        tag: Option<Tag>,
    },
}

/// Where a mapping is between its keys and values.
enum PendingKey {
    Expecting,
    /// Key read; `None` when the key cannot be represented as a string.
    Read(Option<String>),
}

#[derive(Default)]
struct CfnYamlLoader {
    docs: Vec<Value>,
    root: Option<Value>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Value>,
    error: Option<ScanError>,
}

impl MarkedEventReceiver for CfnYamlLoader {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.handle_event(ev, mark) {
            self.error = Some(e);
        }
    }
}

impl CfnYamlLoader {
    fn handle_event(&mut self, ev: Event, mark: Marker) -> Result<(), ScanError> {
        match ev {
            Event::DocumentEnd => {
                if let Some(root) = self.root.take() {
                    self.docs.push(root);
                }
            }
            Event::SequenceStart(anchor, tag) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                anchor,
                tag,
            }),
            Event::MappingStart(anchor, tag) => self.stack.push(Frame::Mapping {
                map: Map::new(),
                key: PendingKey::Expecting,
                anchor,
                tag,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (value, anchor, tag) = match self.stack.pop() {
                    Some(Frame::Sequence { items, anchor, tag }) => {
                        (Value::Array(items), anchor, tag)
                    }
                    Some(Frame::Mapping { map, anchor, tag, .. }) => {
                        (Value::Object(map), anchor, tag)
                    }
                    None => return Err(ScanError::new(mark, "unbalanced collection end")),
                };
                self.insert(apply_tag(value, tag.as_ref()), anchor, mark)?;
            }
            Event::Scalar(text, style, anchor, tag) => {
                let value = match &tag {
                    Some(t) if is_local(t) => apply_tag(Value::String(text), Some(t)),
                    Some(t) if t.handle == CORE_SCHEMA_HANDLE && t.suffix == "str" => {
                        Value::String(text)
                    }
                    _ if style != TScalarStyle::Plain => Value::String(text),
                    _ => plain_scalar(&text),
                };
                self.insert(value, anchor, mark)?;
            }
            Event::Alias(id) => {
                let value = self.anchors.get(&id).cloned().unwrap_or(Value::Null);
                self.insert(value, 0, mark)?;
            }
            Event::StreamStart | Event::StreamEnd | Event::DocumentStart | Event::Nothing => {}
        }
        Ok(())
    }

    fn insert(&mut self, value: Value, anchor: usize, mark: Marker) -> Result<(), ScanError> {
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }

        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Sequence { items, .. }) => items.push(value),
            Some(Frame::Mapping { map, key, .. }) => match std::mem::replace(key, PendingKey::Expecting)
            {
                PendingKey::Expecting => *key = PendingKey::Read(key_string(&value)),
                PendingKey::Read(Some(name)) => {
                    if map.contains_key(&name) {
                        return Err(ScanError::new_string(
                            mark,
                            format!("duplicate key \"{name}\" in mapping"),
                        ));
                    }
                    map.insert(name, value);
                }
                PendingKey::Read(None) => {
                    log::debug!("Dropping mapping entry with a non-scalar key");
                }
            },
        }
        Ok(())
    }
}

/// Whether a tag is a CloudFormation short form (`!Name`).
fn is_local(tag: &Tag) -> bool {
    tag.handle == "!" && !tag.suffix.is_empty()
}

/// Wrap a node in the intrinsic object its short-form tag denotes.
fn apply_tag(value: Value, tag: Option<&Tag>) -> Value {
    let Some(tag) = tag.filter(|t| is_local(t)) else {
        return value;
    };

    let value = match (tag.suffix.as_str(), value) {
        ("GetAtt", Value::String(s)) => match s.split_once('.') {
            Some((resource, attribute)) => Value::Array(vec![
                Value::String(resource.to_string()),
                Value::String(attribute.to_string()),
            ]),
            None => Value::String(s),
        },
        (_, value) => value,
    };

    let mut map = Map::new();
    map.insert(intrinsic_key(&tag.suffix), value);
    Value::Object(map)
}

/// Resolve an untagged plain scalar with the YAML core schema.
fn plain_scalar(text: &str) -> Value {
    match Yaml::from_str(text) {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(b),
        Yaml::Integer(i) => Value::from(i),
        Yaml::Real(r) => r
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::String(r)),
        _ => Value::String(text.to_string()),
    }
}

fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(yaml: &str) -> Value {
        load_documents(yaml).unwrap().remove(0)
    }

    #[test]
    fn test_plain_document() {
        let doc = load("a: 1\nb: [true, ~, 1.5, text]\nc: '42'\n");
        assert_eq!(doc, json!({"a": 1, "b": [true, null, 1.5, "text"], "c": "42"}));
    }

    #[test]
    fn test_mapping_order_preserved() {
        let doc = load("z: 1\na: 2\nm: 3\n");
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_ref_and_condition() {
        let doc = load("a: !Ref TagList\nb: !Condition IsProd\n");
        assert_eq!(doc, json!({"a": {"Ref": "TagList"}, "b": {"Condition": "IsProd"}}));
    }

    #[test]
    fn test_getatt_short_form() {
        let doc = load("a: !GetAtt Bucket.Arn\nb: !GetAtt [Bucket, Arn]\n");
        assert_eq!(
            doc,
            json!({
                "a": {"Fn::GetAtt": ["Bucket", "Arn"]},
                "b": {"Fn::GetAtt": ["Bucket", "Arn"]}
            })
        );
    }

    #[test]
    fn test_tagged_collections_and_scalars() {
        let yaml = r#"
if: !If [IsProd, [{Key: A}], !Ref NoTags]
sub: !Sub "${AWS::StackName}-data"
split: !Split [",", !ImportValue Shared]
azs: !GetAZs ''
"#;
        let doc = load(yaml);
        assert_eq!(
            doc,
            json!({
                "if": {"Fn::If": ["IsProd", [{"Key": "A"}], {"Ref": "NoTags"}]},
                "sub": {"Fn::Sub": "${AWS::StackName}-data"},
                "split": {"Fn::Split": [",", {"Fn::ImportValue": "Shared"}]},
                "azs": {"Fn::GetAZs": ""}
            })
        );
    }

    #[test]
    fn test_tagged_scalar_stays_a_string() {
        let doc = load("a: !Sub 42\nb: !!str 7\n");
        assert_eq!(doc, json!({"a": {"Fn::Sub": "42"}, "b": "7"}));
    }

    #[test]
    fn test_anchors_and_aliases() {
        let doc = load("base: &tags [{Key: DataClassification}]\ncopy: *tags\n");
        assert_eq!(doc["copy"], doc["base"]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        assert!(matches!(
            load_documents("a: 1\na: 2\n"),
            Err(ParseError::YamlError(_))
        ));
    }

    #[test]
    fn test_empty_stream() {
        assert!(load_documents("").unwrap().is_empty());
        assert!(load_documents("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_intrinsic_key() {
        assert_eq!(intrinsic_key("Ref"), "Ref");
        assert_eq!(intrinsic_key("If"), "Fn::If");
    }
}
