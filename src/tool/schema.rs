// ABOUTME: Schema builder and the ToolArgs trait that ties an argument record
// ABOUTME: to the JSON Schema a tool advertises for it.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// An argument record a tool function accepts.
///
/// The schema lists the record's field names, JSON types, descriptions and
/// which fields are required. Decoding uses the record's serde impl.
pub trait ToolArgs: DeserializeOwned + Send + 'static {
    /// JSON Schema describing this record.
    fn schema() -> Value;
}

/// Argument record for tools that take no arguments.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NoArgs {}

impl ToolArgs for NoArgs {
    fn schema() -> Value {
        Schema::empty()
    }
}

/// Entry point for building object schemas.
pub struct Schema;

impl Schema {
    /// Start an object schema.
    pub fn object() -> SchemaBuilder {
        SchemaBuilder {
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// An object schema with no properties.
    pub fn empty() -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": [],
        })
    }
}

/// Builder for object schemas.
pub struct SchemaBuilder {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    fn property(mut self, name: &str, kind: &str, description: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            json!({
                "type": kind,
                "description": description,
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a string property.
    pub fn string(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, "string", description, required)
    }

    /// Add a number property.
    pub fn number(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, "number", description, required)
    }

    /// Add an integer property.
    pub fn integer(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, "integer", description, required)
    }

    /// Add a boolean property.
    pub fn boolean(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, "boolean", description, required)
    }

    /// Add a free-form object property.
    pub fn object(self, name: &str, description: &str, required: bool) -> Self {
        self.property(name, "object", description, required)
    }

    /// Add a string property restricted to a set of values.
    pub fn string_enum(mut self, name: &str, description: &str, values: &[&str], required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            json!({
                "type": "string",
                "description": description,
                "enum": values,
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Finish the schema.
    pub fn build(self) -> Value {
        json!({
            "type": "object",
            "properties": self.properties,
            "required": self.required,
        })
    }
}
