//! Prompt construction for the merge-review completion call.
//!
//! Deterministic: identical inputs always produce identical prompt text.
//! The decision guidelines are static instruction text, not derived from
//! the inputs.

use serde_json::{Map, Value};

use crate::entity::{Entity, PropertyValue};

/// Role-setting message sent ahead of every review prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert entity resolution system. Your job is to determine if two entity records refer to the same real-world entity. Answer with only SAME or DIFFERENT.";

/// Render one entity's property block.
///
/// Entity references render as `key: @code`, sequences join their elements
/// with ", ", everything else uses its default string form. An absent or
/// empty map renders a single "(none)" line.
fn format_properties(properties: Option<&Map<String, Value>>) -> String {
    let Some(props) = properties.filter(|p| !p.is_empty()) else {
        return "Properties:\n  (none)".to_string();
    };

    let mut lines = vec!["Properties:".to_string()];
    for (key, value) in props {
        let rendered = match PropertyValue::classify(value) {
            PropertyValue::EntityRef { code } => format!("@{}", scalar_to_string(code)),
            PropertyValue::Sequence(items) => items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(", "),
            PropertyValue::Scalar(value) => scalar_to_string(value),
        };
        lines.push(format!("  {key}: {rendered}"));
    }
    lines.join("\n")
}

/// Default string form of a scalar: strings bare, everything else via its
/// JSON rendering.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build the complete comparison prompt for two entity records.
///
/// Labels are wrapped in literal quote characters with no further escaping;
/// a label containing quotes passes through as-is.
pub fn build_prompt(entity1: &Entity, entity2: &Entity, similarity: f64) -> String {
    format!(
        r#"TASK: Determine if these two entity records refer to the SAME real-world entity or DIFFERENT entities.

ENTITY 1:
Label: "{label1}"
Type: {type1}
{props1}

ENTITY 2:
Label: "{label2}"
Type: {type2}
{props2}

Semantic Similarity Score: {similarity:.3}

DECISION GUIDELINES:

Vote SAME if:
- Labels are identical or clear variations (abbreviations, spelling variants, translations)
- Properties consistently describe the same entity with matching key attributes
- Any differences are due to perspective, date of record, or level of detail

Vote DIFFERENT if:
- Labels refer to distinct entities (different people, places, organizations, or concepts)
- Properties describe conflicting attributes that cannot belong to the same entity
- Temporal information shows non-overlapping existence (e.g., one ended before other began)
- Contextual clues indicate relationship between entities rather than identity (related but not same)

Consider:
- Type must match for entities to be the same
- More detailed properties override less detailed ones
- Relationships mentioned in properties may indicate distinct entities
- Geographic, temporal, and contextual consistency

Your answer (one word only):
SAME or DIFFERENT"#,
        label1 = entity1.label,
        type1 = entity1.entity_type,
        props1 = format_properties(entity1.properties.as_ref()),
        label2 = entity2.label,
        type2 = entity2.entity_type,
        props2 = format_properties(entity2.properties.as_ref()),
    )
}
