//! Immutable knowledge-base state for one version.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Matrix, Tactic, Technique};
use crate::identity::ObjectIdentity;

/// Every entity of one knowledge-base version, partitioned into top-level
/// techniques and sub-techniques.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    #[serde(rename = "domainID")]
    pub domain_id: String,
    #[serde(default)]
    pub matrices: Vec<Matrix>,
    #[serde(default)]
    pub techniques: Vec<Technique>,
    #[serde(default)]
    pub subtechniques: Vec<Technique>,
}

impl Snapshot {
    /// Every tactic across all matrices, in matrix order. Tactics shared by
    /// several matrices appear once.
    #[must_use]
    pub fn tactics(&self) -> Vec<&Tactic> {
        let mut seen: Vec<&Tactic> = Vec::new();
        for tactic in self.matrices.iter().flat_map(|m| &m.tactics) {
            if !seen.iter().any(|t| t.shortname == tactic.shortname) {
                seen.push(tactic);
            }
        }
        seen
    }

    #[must_use]
    pub fn tactic(&self, shortname: &str) -> Option<&Tactic> {
        self.matrices
            .iter()
            .flat_map(|m| &m.tactics)
            .find(|t| t.shortname == shortname)
    }

    /// The sub-technique tier when `is_subtechnique` is set, else the
    /// top-level tier.
    #[must_use]
    pub fn collection(&self, is_subtechnique: bool) -> &[Technique] {
        if is_subtechnique {
            &self.subtechniques
        } else {
            &self.techniques
        }
    }

    /// Techniques followed by sub-techniques.
    pub fn all_techniques(&self) -> impl Iterator<Item = &Technique> {
        self.techniques.iter().chain(&self.subtechniques)
    }

    /// Every technique-tactic identity that can carry an annotation.
    pub fn all_identities(&self) -> impl Iterator<Item = ObjectIdentity> + '_ {
        self.all_techniques().flat_map(Technique::identities)
    }

    #[must_use]
    pub fn contains_identity(&self, identity: &ObjectIdentity) -> bool {
        self.all_techniques().any(|t| {
            t.attack_id == identity.technique_id() && t.has_tactic(identity.tactic())
        })
    }
}
