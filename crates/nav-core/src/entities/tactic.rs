use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tactic column of a matrix. Techniques reference tactics by `shortname`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tactic {
    pub id: String,
    #[serde(rename = "attackID")]
    pub attack_id: String,
    pub name: String,
    pub shortname: String,
}
