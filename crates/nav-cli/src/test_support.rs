//! On-disk knowledge base used by command tests.
//!
//! v10 → v11 for layer `coverage-v11` (compared to `coverage-v10`):
//! - `T1070` defense-evasion: unchanged, score 5
//! - `T1098` persistence: revoked by `T1556`, which lacks persistence
//! - `T1110` credential-access: revoked by `T1556`, score 3
//! - `T1556` credential-access + defense-evasion: addition

use std::path::Path;

use serde_json::{Value, json};

fn tactics() -> Value {
    json!([
        { "id": "x-mitre-tactic--p", "attackID": "TA0003", "name": "Persistence", "shortname": "persistence" },
        { "id": "x-mitre-tactic--d", "attackID": "TA0005", "name": "Defense Evasion", "shortname": "defense-evasion" },
        { "id": "x-mitre-tactic--c", "attackID": "TA0006", "name": "Credential Access", "shortname": "credential-access" }
    ])
}

fn technique(attack_id: &str, tactics: &[&str]) -> Value {
    json!({
        "id": format!("attack-pattern--{attack_id}"),
        "attackID": attack_id,
        "name": format!("Technique {attack_id}"),
        "tactics": tactics,
    })
}

fn revoked(attack_id: &str, tactics: &[&str]) -> Value {
    let mut value = technique(attack_id, tactics);
    value["status"] = json!("revoked");
    value["revokedBy"] = json!("T1556");
    value
}

fn snapshot(version: &str, techniques: Vec<Value>) -> Value {
    json!({
        "version": version,
        "domainID": "enterprise-attack",
        "matrices": [{ "id": "x-mitre-matrix--enterprise", "name": "Enterprise ATT&CK", "tactics": tactics() }],
        "techniques": techniques,
    })
}

fn write(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn write_knowledge_base(root: &Path) {
    write(
        root,
        "snapshots/v10.json",
        &snapshot(
            "v10",
            vec![
                technique("T1070", &["defense-evasion"]),
                technique("T1098", &["persistence"]),
                technique("T1110", &["credential-access"]),
            ],
        ),
    );
    write(
        root,
        "snapshots/v11.json",
        &snapshot(
            "v11",
            vec![
                technique("T1070", &["defense-evasion"]),
                revoked("T1098", &["persistence"]),
                revoked("T1110", &["credential-access"]),
                technique("T1556", &["credential-access", "defense-evasion"]),
            ],
        ),
    );
    write(
        root,
        "changelogs/v10__v11.json",
        &json!({
            "old_version": "v10",
            "new_version": "v11",
            "additions": [technique("T1556", &["credential-access", "defense-evasion"])],
            "revocations": [revoked("T1098", &["persistence"]), revoked("T1110", &["credential-access"])],
            "unchanged": [technique("T1070", &["defense-evasion"])],
        }),
    );
    write(
        root,
        "layers/coverage-v10.json",
        &json!({
            "id": "coverage-v10",
            "name": "SOC coverage",
            "version": "v10",
            "domainID": "enterprise-attack",
            "techniques": [
                { "techniqueID": "T1070", "tactic": "defense-evasion", "score": 5 },
                { "techniqueID": "T1110", "tactic": "credential-access", "score": 3 }
            ]
        }),
    );
    write(
        root,
        "layers/coverage-v11.json",
        &json!({
            "id": "coverage-v11",
            "name": "SOC coverage",
            "version": "v11",
            "domainID": "enterprise-attack",
            "compareTo": "coverage-v10"
        }),
    );
}
