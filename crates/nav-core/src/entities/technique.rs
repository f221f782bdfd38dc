use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ObjectStatus;
use crate::identity::ObjectIdentity;

/// A technique or sub-technique as it exists in one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    /// Version-scoped internal id. Never used to match across snapshots.
    pub id: String,
    /// Stable cross-version id, e.g. `T1003.001`.
    #[serde(rename = "attackID")]
    pub attack_id: String,
    pub name: String,
    #[serde(default)]
    pub is_subtechnique: bool,
    /// Shortnames of the tactics this technique belongs to.
    #[serde(default)]
    pub tactics: Vec<String>,
    #[serde(default)]
    pub status: ObjectStatus,
    /// Stable id of the technique that replaced this one, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_by: Option<String>,
}

impl Technique {
    /// One identity per tactic, in tactic order.
    #[must_use]
    pub fn identities(&self) -> Vec<ObjectIdentity> {
        self.tactics
            .iter()
            .map(|tactic| ObjectIdentity::new(&self.attack_id, tactic))
            .collect()
    }

    /// The identity of this technique under `tactic`, if it belongs to it.
    #[must_use]
    pub fn identity_for(&self, tactic: &str) -> Option<ObjectIdentity> {
        self.has_tactic(tactic)
            .then(|| ObjectIdentity::new(&self.attack_id, tactic))
    }

    #[must_use]
    pub fn has_tactic(&self, tactic: &str) -> bool {
        self.tactics.iter().any(|t| t == tactic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technique() -> Technique {
        Technique {
            id: "attack-pattern--0001".into(),
            attack_id: "T1055".into(),
            name: "Process Injection".into(),
            is_subtechnique: false,
            tactics: vec!["defense-evasion".into(), "privilege-escalation".into()],
            status: ObjectStatus::Active,
            revoked_by: None,
        }
    }

    #[test]
    fn identities_one_per_tactic() {
        let ids = technique().identities();
        assert_eq!(
            ids,
            vec![
                ObjectIdentity::new("T1055", "defense-evasion"),
                ObjectIdentity::new("T1055", "privilege-escalation"),
            ]
        );
    }

    #[test]
    fn identity_for_requires_membership() {
        let t = technique();
        assert!(t.identity_for("defense-evasion").is_some());
        assert!(t.identity_for("execution").is_none());
    }

    #[test]
    fn deserializes_with_defaults() {
        let t: Technique = serde_json::from_str(
            r#"{"id":"attack-pattern--x","attackID":"T1001","name":"Data Obfuscation"}"#,
        )
        .unwrap();
        assert!(!t.is_subtechnique);
        assert!(t.tactics.is_empty());
        assert_eq!(t.status, ObjectStatus::Active);
        assert!(t.identities().is_empty());
    }
}
