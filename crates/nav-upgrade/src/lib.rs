//! # nav-upgrade
//!
//! Reconciliation engine for carrying a technique layer from one knowledge
//! base version to the next.
//!
//! The engine reads two snapshots, the categorized changelog between them,
//! and the old layer's annotations. It lets a caller walk the changelog,
//! look up each changed entity's counterpart in the old version, copy or
//! revert annotations onto the new layer, and keep per-session review marks.
//!
//! All state is in memory and synchronous. Loading and persisting layers is
//! the job of a [`source::KnowledgeBase`] implementation.

pub mod error;
pub mod filter;
pub mod related;
pub mod resolver;
pub mod review;
pub mod session;
pub mod source;
pub mod store;
pub mod transfer;

mod test_support;

pub use error::UpgradeError;
pub use session::{SessionOptions, UpgradeSession};
pub use source::{Dataset, KnowledgeBase, MemoryKnowledgeBase, SourceError};
pub use store::{AnnotationStore, Layer};
