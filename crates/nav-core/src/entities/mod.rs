//! Knowledge-base entity structs.
//!
//! Entities are immutable within a snapshot. Identity across snapshots is
//! established only through the stable `attack_id`, never the version-scoped
//! `id`. All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod matrix;
mod tactic;
mod technique;

pub use matrix::Matrix;
pub use tactic::Tactic;
pub use technique::Technique;
