//! # Schema Inference
//!
//! Derives an OpenAPI 3.0 schema from a single example JSON value.
//!
//! Arrays are sampled from their first element only; heterogeneous arrays
//! take the shape of that element. Recursion stops at
//! [`MAX_INFERENCE_DEPTH`] and yields an untyped object.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Number, Value};

/// Nesting depth past which inference returns an untyped object.
pub const MAX_INFERENCE_DEPTH: usize = 10;

/// A structural type description.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// `type: boolean`, with an optional literal example.
    Boolean(Option<bool>),
    /// `type: integer`, with an optional literal example.
    Integer(Option<Number>),
    /// `type: number`, with an optional literal example.
    Number(Option<Number>),
    /// `type: string` and its modifiers.
    String(StringSchema),
    /// `type: array` of a single item schema.
    Array(Box<Schema>),
    /// `type: object`.
    Object(ObjectSchema),
}

/// Modifiers of a string schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringSchema {
    /// Literal example.
    pub example: Option<String>,
    /// Whether `null` is allowed. Null examples infer a nullable string.
    pub nullable: bool,
    /// Format hint (e.g. `binary`).
    pub format: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
}

impl StringSchema {
    /// A string carrying a literal example.
    pub fn with_example(example: impl Into<String>) -> Self {
        Self {
            example: Some(example.into()),
            ..Default::default()
        }
    }

    /// A nullable string without example.
    pub fn nullable() -> Self {
        Self {
            nullable: true,
            ..Default::default()
        }
    }

    /// A binary-format string, used for file uploads.
    pub fn binary(description: impl Into<String>) -> Self {
        Self {
            format: Some("binary".to_string()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// Properties of an object schema.
///
/// `properties == None` renders an untyped object (`{type: object}`); an
/// inferred object always carries a (possibly empty) property map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Property schemas in insertion order.
    pub properties: Option<IndexMap<String, Schema>>,
    /// Names of required properties, in insertion order, without duplicates.
    pub required: Vec<String>,
}

impl Schema {
    /// A plain string schema.
    pub fn string() -> Self {
        Schema::String(StringSchema::default())
    }

    /// An object schema with no declared properties.
    pub fn untyped_object() -> Self {
        Schema::Object(ObjectSchema::default())
    }

    /// An object schema with the given properties and required names.
    pub fn object(properties: IndexMap<String, Schema>, required: Vec<String>) -> Self {
        Schema::Object(ObjectSchema {
            properties: Some(properties),
            required,
        })
    }

    /// Renders the schema as an OpenAPI 3.0 schema object.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        match self {
            Schema::Boolean(example) => {
                obj.insert("type".to_string(), json!("boolean"));
                if let Some(example) = example {
                    obj.insert("example".to_string(), json!(example));
                }
            }
            Schema::Integer(example) | Schema::Number(example) => {
                let ty = if matches!(self, Schema::Integer(_)) {
                    "integer"
                } else {
                    "number"
                };
                obj.insert("type".to_string(), json!(ty));
                if let Some(example) = example {
                    obj.insert("example".to_string(), Value::Number(example.clone()));
                }
            }
            Schema::String(s) => {
                obj.insert("type".to_string(), json!("string"));
                if let Some(format) = &s.format {
                    obj.insert("format".to_string(), json!(format));
                }
                if let Some(desc) = &s.description {
                    obj.insert("description".to_string(), json!(desc));
                }
                if s.nullable {
                    obj.insert("nullable".to_string(), json!(true));
                }
                if let Some(example) = &s.example {
                    obj.insert("example".to_string(), json!(example));
                }
            }
            Schema::Array(items) => {
                obj.insert("type".to_string(), json!("array"));
                obj.insert("items".to_string(), items.to_value());
            }
            Schema::Object(o) => {
                obj.insert("type".to_string(), json!("object"));
                if let Some(properties) = &o.properties {
                    let props = properties
                        .iter()
                        .map(|(name, schema)| (name.clone(), schema.to_value()))
                        .collect::<Map<_, _>>();
                    obj.insert("properties".to_string(), Value::Object(props));
                }
                if !o.required.is_empty() {
                    obj.insert("required".to_string(), json!(o.required));
                }
            }
        }
        Value::Object(obj)
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// Infers a schema from an example value.
pub fn infer_schema(value: &Value) -> Schema {
    infer_schema_at_depth(value, 0)
}

/// Infers a schema from an example value found at nesting `depth`.
pub fn infer_schema_at_depth(value: &Value, depth: usize) -> Schema {
    if depth > MAX_INFERENCE_DEPTH {
        return Schema::untyped_object();
    }

    match value {
        Value::Null => Schema::String(StringSchema::nullable()),
        Value::Bool(b) => Schema::Boolean(Some(*b)),
        Value::Number(n) if is_integral(n) => Schema::Integer(Some(n.clone())),
        Value::Number(n) => Schema::Number(Some(n.clone())),
        Value::String(s) => Schema::String(StringSchema::with_example(s.clone())),
        Value::Array(items) => match items.first() {
            Some(first) => Schema::Array(Box::new(infer_schema_at_depth(first, depth + 1))),
            None => Schema::Array(Box::new(Schema::untyped_object())),
        },
        Value::Object(map) => {
            let mut properties = IndexMap::new();
            let mut required = Vec::new();
            for (key, child) in map {
                properties.insert(key.clone(), infer_schema_at_depth(child, depth + 1));
                if is_present(child) {
                    required.push(key.clone());
                }
            }
            Schema::object(properties, required)
        }
    }
}

/// A property is required when its example is neither null nor an empty string.
fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Null) && value.as_str() != Some("")
}

/// `1.0` counts as an integer, as JSON makes no distinction.
fn is_integral(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required_excludes_null_and_empty_strings() {
        let schema = infer_schema(&json!({ "a": 1, "b": null, "c": "" }));
        let Schema::Object(obj) = &schema else {
            panic!("expected object");
        };
        assert_eq!(obj.required, vec!["a".to_string()]);
        assert_eq!(obj.properties.as_ref().unwrap().len(), 3);
        assert_eq!(
            obj.properties.as_ref().unwrap()["b"],
            Schema::String(StringSchema::nullable())
        );
    }

    #[test]
    fn test_false_and_zero_are_required() {
        let schema = infer_schema(&json!({ "flag": false, "count": 0, "items": [] }));
        let Schema::Object(obj) = schema else {
            panic!("expected object");
        };
        assert_eq!(obj.required, vec!["flag", "count", "items"]);
    }

    #[test]
    fn test_array_samples_first_element_only() {
        let mixed = json!([1, "two", { "three": 3 }]);
        let schema = infer_schema(&mixed);
        assert_eq!(
            schema,
            Schema::Array(Box::new(infer_schema(&json!(1))))
        );

        let objects = json!([{ "id": 1 }, { "id": 2, "extra": true }]);
        let Schema::Array(item) = infer_schema(&objects) else {
            panic!("expected array");
        };
        assert_eq!(*item, infer_schema(&json!({ "id": 1 })));
    }

    #[test]
    fn test_empty_array_items_are_untyped_objects() {
        assert_eq!(
            infer_schema(&json!([])).to_value(),
            json!({ "type": "array", "items": { "type": "object" } })
        );
    }

    #[test]
    fn test_integer_and_number_split() {
        assert_eq!(infer_schema(&json!(3)), Schema::Integer(Some(3.into())));
        assert_eq!(infer_schema(&json!(-3)), Schema::Integer(Some((-3).into())));
        assert!(matches!(infer_schema(&json!(2.0)), Schema::Integer(_)));
        assert!(matches!(infer_schema(&json!(2.5)), Schema::Number(_)));
        assert_eq!(
            infer_schema(&json!(2.5)).to_value(),
            json!({ "type": "number", "example": 2.5 })
        );
    }

    #[test]
    fn test_leaves_carry_examples() {
        assert_eq!(
            infer_schema(&json!(true)).to_value(),
            json!({ "type": "boolean", "example": true })
        );
        assert_eq!(
            infer_schema(&json!("abc")).to_value(),
            json!({ "type": "string", "example": "abc" })
        );
        assert_eq!(
            infer_schema(&Value::Null).to_value(),
            json!({ "type": "string", "nullable": true })
        );
    }

    #[test]
    fn test_nested_object_rendering() {
        let value = json!({
            "data": { "id": "v1", "tags": ["a"], "duration": 12.5 },
            "meta": null
        });
        let expected = json!({
            "type": "object",
            "properties": {
                "data": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "example": "v1" },
                        "tags": { "type": "array", "items": { "type": "string", "example": "a" } },
                        "duration": { "type": "number", "example": 12.5 }
                    },
                    "required": ["id", "tags", "duration"]
                },
                "meta": { "type": "string", "nullable": true }
            },
            "required": ["data"]
        });
        assert_eq!(infer_schema(&value).to_value(), expected);
    }

    #[test]
    fn test_empty_object_keeps_properties_map() {
        assert_eq!(
            infer_schema(&json!({})).to_value(),
            json!({ "type": "object", "properties": {} })
        );
    }

    #[test]
    fn test_depth_cap() {
        let mut value = json!("leaf");
        for _ in 0..15 {
            value = json!({ "n": value });
        }

        let mut schema = infer_schema(&value);
        let mut depth = 0;
        while let Schema::Object(ObjectSchema {
            properties: Some(props),
            ..
        }) = schema
        {
            schema = props["n"].clone();
            depth += 1;
        }
        // Levels 0..=10 are inferred, level 11 is cut off.
        assert_eq!(depth, MAX_INFERENCE_DEPTH + 1);
        assert_eq!(schema, Schema::untyped_object());
    }

    #[test]
    fn test_inference_is_idempotent() {
        let value = json!({ "a": [{ "b": 1.5 }], "c": null });
        assert_eq!(infer_schema(&value), infer_schema(&value));
    }
}
