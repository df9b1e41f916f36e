//! Review request/response schema shared by the daemon and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Binary classification of a candidate merge. Closed two-element set: the
/// parser is total over it and the gateway never emits anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "SAME")]
    Same,
    #[serde(rename = "DIFFERENT")]
    Different,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Same => "SAME",
            Decision::Different => "DIFFERENT",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound body of `POST /review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub entity1: Entity,
    pub entity2: Entity,
    pub similarity: f64,
}

/// Outcome of a review: the decision plus provider-reported token
/// accounting (not independently verified).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    pub decision: Decision,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}
