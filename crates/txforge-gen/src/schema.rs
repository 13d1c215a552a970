//! Schema extraction from metadata documents
//!
//! A metadata document is an arbitrary JSON mapping produced by an external
//! modeling tool. Extraction is deliberately lenient: absent or
//! wrongly-typed fields degrade to defaults instead of erroring, so any
//! parseable document yields a usable schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Fallback table name when a document carries neither `schemaKey` nor `name`
pub const DEFAULT_TABLE_NAME: &str = "unknown_table";

/// Fallback entity key when a document carries no `entityKey`
pub const DEFAULT_ENTITY_KEY: &str = "default_entity";

/// Fallback schema key used in output file names
pub const DEFAULT_SCHEMA_KEY: &str = "unknown_schema";

/// Generation type for a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Random short text value
    String,
    /// Stringified integer value
    Integer,
    /// Milliseconds since the Unix epoch
    Timestamp,
    /// Fixed operation descriptor
    Operation,
}

impl FieldType {
    /// Look up a source datatype tag (case-insensitive)
    ///
    /// Recognized tags: `STRING`, `INTEGER`, `INT`, `TIMESTAMP`, `DATETIME`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "STRING" => Some(FieldType::String),
            "INTEGER" | "INT" => Some(FieldType::Integer),
            "TIMESTAMP" | "DATETIME" => Some(FieldType::Timestamp),
            _ => None,
        }
    }
}

/// Ordered field-name→type map for one table
pub type FieldMap = IndexMap<String, FieldType>;

/// Mapping from table name to its field map
pub type CanonicalSchema = IndexMap<String, FieldMap>;

/// Canonical schema plus the naming metadata carried alongside it
///
/// `entity_key` and `schema_key` only participate in output file naming;
/// they are not part of the schema data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSchema {
    pub table_name: String,
    pub entity_key: String,
    pub schema_key: String,
    pub schema: CanonicalSchema,
}

/// One attribute descriptor read from a document's `attributes` sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub datatype: Option<String>,
    pub logical_datatype: Option<String>,
}

impl AttributeDescriptor {
    fn from_value(value: &Value) -> Self {
        Self {
            name: string_field(value, "name").unwrap_or_default(),
            datatype: string_field(value, "datatype"),
            logical_datatype: string_field(value, "logicalDatatype"),
        }
    }
}

/// Resolve an attribute's generation type
///
/// The resolution chain tries `datatype` first, then `logicalDatatype`,
/// and falls back to [`FieldType::String`] when neither carries a
/// recognized tag.
pub fn resolve_field_type(attr: &AttributeDescriptor) -> FieldType {
    [&attr.datatype, &attr.logical_datatype]
        .into_iter()
        .flatten()
        .find_map(|tag| FieldType::from_tag(tag))
        .unwrap_or(FieldType::String)
}

/// Extract the canonical schema from a parsed metadata document
///
/// Total function: every JSON value yields a schema. Attribute order is
/// preserved; attributes with an empty name are dropped; duplicate names
/// keep the last type seen. The resulting field map always ends with a
/// synthetic `operation` field, preceded by a synthetic `key` field when
/// the document contributed no usable attributes.
pub fn extract_schema(doc: &Value) -> ExtractedSchema {
    let schema_key = string_field(doc, "schemaKey");

    let table_name = schema_key
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| string_field(doc, "name").filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

    let entity_key =
        string_field(doc, "entityKey").unwrap_or_else(|| DEFAULT_ENTITY_KEY.to_string());

    let mut fields = FieldMap::new();
    if let Some(attributes) = doc.get("attributes").and_then(Value::as_array) {
        for attr_value in attributes {
            let attr = AttributeDescriptor::from_value(attr_value);
            if attr.name.is_empty() {
                continue;
            }
            let field_type = resolve_field_type(&attr);
            fields.insert(attr.name, field_type);
        }
    }

    if fields.is_empty() {
        fields.insert("key".to_string(), FieldType::String);
    }
    fields.insert("operation".to_string(), FieldType::Operation);

    debug!(
        table = %table_name,
        field_count = fields.len(),
        "Extracted schema"
    );

    let mut schema = CanonicalSchema::new();
    schema.insert(table_name.clone(), fields);

    ExtractedSchema {
        table_name,
        entity_key,
        schema_key: schema_key.unwrap_or_else(|| DEFAULT_SCHEMA_KEY.to_string()),
        schema,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
