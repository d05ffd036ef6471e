//! Response schemas for structured (JSON) generation.
//!
//! A [`Schema`] is sent with the request so the service constrains its output,
//! and the parsed reply is checked against the same value before it is
//! deserialized. The service's conformance is never taken on trust.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String { choices: Vec<String> },
    Number,
    Integer,
    Boolean,
    Array(Box<Schema>),
    Object(Vec<Property>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: Schema,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String { choices: Vec::new() })
    }

    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array(Box::new(items)))
    }

    pub fn object() -> Self {
        Self::of(SchemaKind::Object(Vec::new()))
    }

    /// Shorthand for an array of plain strings.
    pub fn strings() -> Self {
        Self::array(Self::string())
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restricts a string schema to the given choices. Ignored on other kinds.
    pub fn one_of<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match &mut self.kind {
            SchemaKind::String { choices: existing } => {
                existing.extend(choices.into_iter().map(Into::into));
            }
            other => {
                debug_assert!(false, "one_of applies to string schemas, not {:?}", other);
                log::warn!("ignoring one_of on a {:?} schema", other);
            }
        }
        self
    }

    pub fn property(self, name: impl Into<String>, schema: Schema) -> Self {
        self.push_property(name.into(), schema, true)
    }

    /// A property that may be absent or null.
    pub fn optional_property(self, name: impl Into<String>, schema: Schema) -> Self {
        self.push_property(name.into(), schema, false)
    }

    fn push_property(mut self, name: String, schema: Schema, required: bool) -> Self {
        match &mut self.kind {
            SchemaKind::Object(properties) => properties.push(Property {
                name,
                schema,
                required,
            }),
            other => {
                debug_assert!(false, "properties apply to object schemas, not {:?}", other);
                log::warn!("ignoring property '{}' on a {:?} schema", name, other);
            }
        }
        self
    }

    /// Renders the schema in the service's response-schema format.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        match &self.kind {
            SchemaKind::String { choices } => {
                out.insert("type".into(), json!("STRING"));
                if !choices.is_empty() {
                    out.insert("enum".into(), json!(choices));
                }
            }
            SchemaKind::Number => {
                out.insert("type".into(), json!("NUMBER"));
            }
            SchemaKind::Integer => {
                out.insert("type".into(), json!("INTEGER"));
            }
            SchemaKind::Boolean => {
                out.insert("type".into(), json!("BOOLEAN"));
            }
            SchemaKind::Array(items) => {
                out.insert("type".into(), json!("ARRAY"));
                out.insert("items".into(), items.to_json());
            }
            SchemaKind::Object(properties) => {
                out.insert("type".into(), json!("OBJECT"));
                let rendered: Map<String, Value> = properties
                    .iter()
                    .map(|p| (p.name.clone(), p.schema.to_json()))
                    .collect();
                let required: Vec<&str> = properties
                    .iter()
                    .filter(|p| p.required)
                    .map(|p| p.name.as_str())
                    .collect();
                let ordering: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
                out.insert("properties".into(), Value::Object(rendered));
                if !required.is_empty() {
                    out.insert("required".into(), json!(required));
                }
                out.insert("propertyOrdering".into(), json!(ordering));
            }
        }
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        Value::Object(out)
    }

    /// Checks `value` against the schema, reporting the first mismatch.
    ///
    /// Extra object properties are tolerated.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        let mismatch = |expected: &str| SchemaViolation {
            path: path.to_string(),
            expected: expected.to_string(),
            found: describe_value(value),
        };

        match (&self.kind, value) {
            (SchemaKind::String { choices }, Value::String(s)) => {
                if choices.is_empty() || choices.iter().any(|c| c == s) {
                    Ok(())
                } else {
                    Err(mismatch(&format!("one of {:?}", choices)))
                }
            }
            (SchemaKind::Number, Value::Number(_)) => Ok(()),
            (SchemaKind::Integer, Value::Number(n)) => {
                let whole = n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0);
                if whole { Ok(()) } else { Err(mismatch("integer")) }
            }
            (SchemaKind::Boolean, Value::Bool(_)) => Ok(()),
            (SchemaKind::Array(items), Value::Array(values)) => {
                for (index, item) in values.iter().enumerate() {
                    items.validate_at(&format!("{}[{}]", path, index), item)?;
                }
                Ok(())
            }
            (SchemaKind::Object(properties), Value::Object(fields)) => {
                for property in properties {
                    let child = format!("{}.{}", path, property.name);
                    match fields.get(&property.name) {
                        None | Some(Value::Null) if !property.required => {}
                        None => {
                            return Err(SchemaViolation {
                                path: child,
                                expected: property.schema.kind_name().to_string(),
                                found: "nothing".to_string(),
                            });
                        }
                        Some(field) => property.schema.validate_at(&child, field)?,
                    }
                }
                Ok(())
            }
            (kind, _) => Err(mismatch(kind_name(kind))),
        }
    }

    fn kind_name(&self) -> &'static str {
        kind_name(&self.kind)
    }
}

fn kind_name(kind: &SchemaKind) -> &'static str {
    match kind {
        SchemaKind::String { .. } => "string",
        SchemaKind::Number => "number",
        SchemaKind::Integer => "integer",
        SchemaKind::Boolean => "boolean",
        SchemaKind::Array(_) => "array",
        SchemaKind::Object(_) => "object",
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// Where and how a parsed reply departed from its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: expected {}, found {}", self.path, self.expected, self.found)
    }
}

impl std::error::Error for SchemaViolation {}

/// A type produced by structured generation, paired with its response schema.
pub trait StructuredOutput: DeserializeOwned {
    fn schema() -> Schema;
}

impl StructuredOutput for String {
    fn schema() -> Schema {
        Schema::string()
    }
}

impl<T: StructuredOutput> StructuredOutput for Vec<T> {
    fn schema() -> Schema {
        Schema::array(T::schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline_grade() -> Schema {
        Schema::object()
            .property("score", Schema::integer().describe("0-100"))
            .property("analysis", Schema::string())
            .property("suggestions", Schema::strings())
    }

    #[test]
    fn renders_object_schema() {
        let rendered = headline_grade().to_json();
        assert_eq!(
            rendered,
            json!({
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "INTEGER", "description": "0-100" },
                    "analysis": { "type": "STRING" },
                    "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["score", "analysis", "suggestions"],
                "propertyOrdering": ["score", "analysis", "suggestions"]
            })
        );
    }

    #[test]
    fn renders_enum_and_optional() {
        let schema = Schema::object()
            .property("mood", Schema::string().one_of(["calm", "anxious"]))
            .optional_property("note", Schema::string());
        let rendered = schema.to_json();
        assert_eq!(rendered["properties"]["mood"]["enum"], json!(["calm", "anxious"]));
        assert_eq!(rendered["required"], json!(["mood"]));
    }

    #[test]
    fn accepts_conforming_value() {
        let value = json!({
            "score": 82,
            "analysis": "Punchy.",
            "suggestions": ["Add a number"],
            "extra": true
        });
        assert!(headline_grade().validate(&value).is_ok());
    }

    #[test]
    fn reports_missing_required_property() {
        let err = headline_grade()
            .validate(&json!({ "score": 1, "analysis": "x" }))
            .unwrap_err();
        assert_eq!(err.path, "$.suggestions");
        assert_eq!(err.found, "nothing");
    }

    #[test]
    fn reports_nested_type_mismatch() {
        let err = headline_grade()
            .validate(&json!({ "score": 1, "analysis": "x", "suggestions": ["ok", 3] }))
            .unwrap_err();
        assert_eq!(err.path, "$.suggestions[1]");
        assert_eq!(err.expected, "string");
    }

    #[test]
    fn integers_reject_fractions() {
        assert!(Schema::integer().validate(&json!(3.0)).is_ok());
        assert!(Schema::integer().validate(&json!(3.5)).is_err());
        assert!(Schema::number().validate(&json!(3.5)).is_ok());
    }

    #[test]
    fn enum_choices_are_enforced() {
        let schema = Schema::string().one_of(["low", "high"]);
        assert!(schema.validate(&json!("low")).is_ok());
        assert!(schema.validate(&json!("medium")).is_err());
    }

    #[test]
    fn optional_properties_may_be_null_or_absent() {
        let schema = Schema::object().optional_property("note", Schema::string());
        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({ "note": null })).is_ok());
        assert!(schema.validate(&json!({ "note": 5 })).is_err());
    }

    #[test]
    fn required_null_is_a_violation() {
        let schema = Schema::object().property("title", Schema::string());
        let err = schema.validate(&json!({ "title": null })).unwrap_err();
        assert_eq!(err.found, "null");
    }

    #[test]
    fn vec_of_strings_schema() {
        assert_eq!(<Vec<String> as StructuredOutput>::schema(), Schema::strings());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one_of applies to string schemas")]
    fn one_of_on_a_number_is_caught_in_debug_builds() {
        let _ = Schema::number().one_of(["low"]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "properties apply to object schemas")]
    fn property_on_an_array_is_caught_in_debug_builds() {
        let _ = Schema::strings().property("name", Schema::string());
    }
}
