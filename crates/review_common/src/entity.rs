//! Entity records exchanged with the upstream resolution pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate real-world-referring record supplied by the caller.
///
/// Entities are opaque inputs: no uniqueness or cross-entity invariants are
/// enforced here. Property maps keep their insertion order so the prompt
/// renders them the way the caller sent them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

/// A single property value, classified into the closed set of shapes the
/// prompt formatter understands.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue<'a> {
    /// Tagged reference to another entity: `{"type": "entity_ref", "code": ...}`.
    /// The code is usually a string but renders via its string form either
    /// way, so a numeric code still becomes `@3`.
    EntityRef { code: &'a Value },
    /// Ordered sequence of scalars.
    Sequence(&'a [Value]),
    /// Anything else, rendered via its default string form.
    Scalar(&'a Value),
}

impl<'a> PropertyValue<'a> {
    /// Classify a raw property value. Total: every value lands in exactly
    /// one variant, so formatting can match exhaustively.
    pub fn classify(value: &'a Value) -> Self {
        if let Some(obj) = value.as_object() {
            if obj.get("type").and_then(Value::as_str) == Some("entity_ref") {
                if let Some(code) = obj.get("code") {
                    return PropertyValue::EntityRef { code };
                }
            }
        }
        if let Some(items) = value.as_array() {
            return PropertyValue::Sequence(items);
        }
        PropertyValue::Scalar(value)
    }
}
