use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Separator used when an identity is displayed as a single token.
///
/// Display only: identities are never parsed back from their display form.
pub const IDENTITY_DELIMITER: char = '^';

/// Composite key of one annotatable cell: a technique under one tactic.
///
/// Equality is component-wise. A technique that spans three tactics yields
/// three distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ObjectIdentity {
    #[serde(rename = "techniqueID")]
    technique_id: String,
    tactic: String,
}

impl ObjectIdentity {
    #[must_use]
    pub fn new(technique_id: impl Into<String>, tactic: impl Into<String>) -> Self {
        Self {
            technique_id: technique_id.into(),
            tactic: tactic.into(),
        }
    }

    /// Stable cross-version technique id (e.g. `T1003.001`).
    #[must_use]
    pub fn technique_id(&self) -> &str {
        &self.technique_id
    }

    /// Tactic shortname (e.g. `credential-access`).
    #[must_use]
    pub fn tactic(&self) -> &str {
        &self.tactic
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{IDENTITY_DELIMITER}{}", self.technique_id, self.tactic)
    }
}
