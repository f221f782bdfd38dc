//! # nav-core
//!
//! Core types shared by every navup crate.
//!
//! This crate provides the foundational vocabulary of a layer upgrade:
//! - `ObjectIdentity`, the composite technique + tactic key annotations hang off
//! - Knowledge-base entities (techniques, tactics, matrices) and snapshots
//! - Changelog categories and the categorized `VersionChangelog`
//! - User annotations and their portable record form
//! - Human-readable label helpers
//! - Cross-cutting error types

pub mod annotation;
pub mod changelog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod labels;
pub mod snapshot;
