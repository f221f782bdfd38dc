use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Tactic;

/// An ordered set of tactic columns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Matrix {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tactics: Vec<Tactic>,
}
