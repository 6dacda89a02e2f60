//! CloudFormation template structure types.
//!
//! Defines the parsed view of a template the rules work against: the ordered
//! resource map, template metadata and source positions.

use serde_json::{Map, Value};

/// Error type for parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("YAML parse error: {0}")]
    YamlError(String),
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("Empty document")]
    EmptyDocument,
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

/// Position in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Source syntax of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    #[default]
    Yaml,
    Json,
}

/// Parsed CloudFormation template.
#[derive(Debug, Clone, Default)]
pub struct Template {
    /// Resources in declaration order.
    pub resources: Vec<Resource>,
    /// Top-level `Metadata` section.
    pub metadata: Option<Value>,
    /// Syntax the template was written in.
    pub format: TemplateFormat,
    /// Raw source content for position lookups.
    pub source: String,
}

impl Template {
    /// The ordered resource map.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Look up a resource by logical name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// A single entry of the `Resources` section.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    /// Logical name.
    pub name: String,
    /// The `Type` field, if present and a string.
    pub resource_type: Option<String>,
    /// The `Properties` block as written.
    pub properties: Option<Value>,
    /// The resource-level `Metadata` block.
    pub metadata: Option<Value>,
    /// Position of the resource key.
    pub position: Option<Position>,
    /// Position of the `Properties` -> `Tags` key.
    pub tags_position: Option<Position>,
}

/// Shape of a resource's `Properties.Tags` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TagsValue<'a> {
    /// No tags declared (or no properties at all).
    Absent,
    /// A list of `{Key, Value}` records.
    Sequence(&'a [Value]),
    /// A direct key to value mapping, or an intrinsic function object.
    Mapping(&'a Map<String, Value>),
    /// Anything else: scalars, null, or a properties block that is not a mapping.
    Other(&'a Value),
}

impl Resource {
    /// The declared type, or `""` when absent.
    pub fn type_name(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("")
    }

    /// Classify the `Properties.Tags` value.
    pub fn tags(&self) -> TagsValue<'_> {
        let properties = match &self.properties {
            None | Some(Value::Null) => return TagsValue::Absent,
            Some(Value::Object(properties)) => properties,
            Some(other) => return TagsValue::Other(other),
        };

        match properties.get("Tags") {
            None => TagsValue::Absent,
            Some(Value::Array(items)) => TagsValue::Sequence(items),
            Some(Value::Object(map)) => TagsValue::Mapping(map),
            Some(other) => TagsValue::Other(other),
        }
    }
}

/// Detect the syntax of a template from its first significant character.
pub fn detect_format(content: &str) -> TemplateFormat {
    if content.trim_start().starts_with('{') {
        TemplateFormat::Json
    } else {
        TemplateFormat::Yaml
    }
}

/// Parse a CloudFormation template from a string.
pub fn parse_template(content: &str) -> Result<Template, ParseError> {
    let (root, format) = match detect_format(content) {
        TemplateFormat::Json => match serde_json::from_str::<Value>(content) {
            Ok(root) => (root, TemplateFormat::Json),
            // A leading `{` may also open a YAML flow mapping.
            Err(json_err) => match super::parse_yaml(content) {
                Ok(root) => (root, TemplateFormat::Yaml),
                Err(_) => return Err(ParseError::JsonError(json_err.to_string())),
            },
        },
        TemplateFormat::Yaml => (super::parse_yaml(content)?, TemplateFormat::Yaml),
    };

    let root = match root {
        Value::Object(map) => map,
        _ => {
            return Err(ParseError::InvalidStructure(
                "Template root must be a mapping".to_string(),
            ));
        }
    };

    let mut template = Template {
        metadata: root.get("Metadata").cloned(),
        format,
        source: content.to_string(),
        ..Default::default()
    };

    match root.get("Resources") {
        Some(Value::Object(resources)) => {
            for (name, value) in resources {
                match value {
                    Value::Object(body) => {
                        template.resources.push(parse_resource(name, body, content));
                    }
                    _ => log::debug!("Skipping resource {name}: declaration is not a mapping"),
                }
            }
        }
        Some(_) => log::warn!("Resources section is not a mapping; no resources to check"),
        None => log::debug!("Template has no Resources section"),
    }

    Ok(template)
}

/// Parse a single resource declaration.
fn parse_resource(name: &str, body: &Map<String, Value>, source: &str) -> Resource {
    Resource {
        name: name.to_string(),
        resource_type: body
            .get("Type")
            .and_then(|t| t.as_str())
            .map(String::from),
        properties: body.get("Properties").cloned(),
        metadata: body.get("Metadata").cloned(),
        position: super::find_position_for_key(source, &["Resources", name]),
        tags_position: super::find_position_for_key(
            source,
            &["Resources", name, "Properties", "Tags"],
        ),
    }
}
