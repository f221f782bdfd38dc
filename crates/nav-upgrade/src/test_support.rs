//! Shared fixtures for nav-upgrade unit tests.
//!
//! Old snapshot (v8) → new snapshot (v9):
//! - `T1001` defense-evasion: unchanged
//! - `T1002` defense-evasion + persistence → persistence only: changes
//! - `T1003` credential-access: revoked by `T1005`
//! - `T1003.001` credential-access: minor change
//! - `T1004` execution: deprecated
//! - `T1005` credential-access: addition

#[cfg(test)]
pub(crate) mod fixtures {
    use nav_core::changelog::VersionChangelog;
    use nav_core::entities::{Matrix, Tactic, Technique};
    use nav_core::enums::ObjectStatus;
    use nav_core::labels::header_label;
    use nav_core::snapshot::Snapshot;

    pub fn tactic(shortname: &str) -> Tactic {
        Tactic {
            id: format!("x-mitre-tactic--{shortname}"),
            attack_id: format!("TA-{shortname}"),
            name: header_label(shortname),
            shortname: shortname.into(),
        }
    }

    pub fn technique(attack_id: &str, tactics: &[&str]) -> Technique {
        Technique {
            id: format!("attack-pattern--{attack_id}"),
            attack_id: attack_id.into(),
            name: format!("Technique {attack_id}"),
            is_subtechnique: attack_id.contains('.'),
            tactics: tactics.iter().map(ToString::to_string).collect(),
            status: ObjectStatus::Active,
            revoked_by: None,
        }
    }

    fn matrix() -> Matrix {
        Matrix {
            id: "x-mitre-matrix--enterprise".into(),
            name: "Enterprise ATT&CK".into(),
            tactics: ["execution", "persistence", "defense-evasion", "credential-access"]
                .into_iter()
                .map(tactic)
                .collect(),
        }
    }

    pub fn old_snapshot() -> Snapshot {
        Snapshot {
            version: "v8".into(),
            domain_id: "enterprise-attack".into(),
            matrices: vec![matrix()],
            techniques: vec![
                technique("T1001", &["defense-evasion"]),
                technique("T1002", &["defense-evasion", "persistence"]),
                technique("T1003", &["credential-access"]),
                technique("T1004", &["execution"]),
            ],
            subtechniques: vec![technique("T1003.001", &["credential-access"])],
        }
    }

    pub fn revoked_t1003() -> Technique {
        Technique {
            status: ObjectStatus::Revoked,
            revoked_by: Some("T1005".into()),
            ..technique("T1003", &["credential-access"])
        }
    }

    pub fn deprecated_t1004() -> Technique {
        Technique {
            status: ObjectStatus::Deprecated,
            ..technique("T1004", &["execution"])
        }
    }

    pub fn new_snapshot() -> Snapshot {
        Snapshot {
            version: "v9".into(),
            domain_id: "enterprise-attack".into(),
            matrices: vec![matrix()],
            techniques: vec![
                technique("T1001", &["defense-evasion"]),
                technique("T1002", &["persistence"]),
                revoked_t1003(),
                deprecated_t1004(),
                technique("T1005", &["credential-access"]),
            ],
            subtechniques: vec![technique("T1003.001", &["credential-access"])],
        }
    }

    pub fn changelog() -> VersionChangelog {
        VersionChangelog {
            additions: vec![technique("T1005", &["credential-access"])],
            changes: vec![technique("T1002", &["persistence"])],
            minor_changes: vec![technique("T1003.001", &["credential-access"])],
            deprecations: vec![deprecated_t1004()],
            revocations: vec![revoked_t1003()],
            unchanged: vec![technique("T1001", &["defense-evasion"])],
            ..VersionChangelog::empty("v8", "v9")
        }
    }
}
