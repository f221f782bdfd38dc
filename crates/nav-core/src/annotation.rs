//! User-authored annotation state and its portable record form.
//!
//! An [`Annotation`] is a closed struct of named fields plus one open
//! `extensions` map for forward-compatible data. The [`AnnotationRecord`]
//! flattens an annotation beside its identity and is the shape used for
//! transfer between layers and for the layer file format.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identity::ObjectIdentity;

/// Numeric or categorical score.
///
/// Non-finite numbers have no JSON form and do not survive serialization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum Score {
    Numeric(f64),
    Categorical(String),
}

/// A hyperlink attached to an annotated cell.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnnotationLink {
    pub label: String,
    pub url: String,
}

/// A user-visible name/value pair. A `divider` entry separates groups and
/// carries no name or value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MetadataEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub divider: bool,
}

impl MetadataEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            divider: false,
        }
    }

    #[must_use]
    pub fn divider() -> Self {
        Self {
            divider: true,
            ..Self::default()
        }
    }
}

/// Annotation state of one identity within one layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<AnnotationLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Annotation {
    /// The default annotation: no score, no comment, enabled.
    pub const EMPTY: Self = Self {
        score: None,
        comment: String::new(),
        enabled: true,
        color: None,
        links: Vec::new(),
        metadata: Vec::new(),
        extensions: BTreeMap::new(),
    };

    /// Whether any field differs from [`Annotation::EMPTY`].
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        *self != Self::EMPTY
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(Score::Numeric(score));
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// An annotation bound to the identity it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnnotationRecord {
    #[serde(rename = "techniqueID")]
    pub technique_id: String,
    pub tactic: String,
    #[serde(flatten)]
    pub annotation: Annotation,
}

impl AnnotationRecord {
    #[must_use]
    pub fn new(identity: &ObjectIdentity, annotation: Annotation) -> Self {
        Self {
            technique_id: identity.technique_id().to_owned(),
            tactic: identity.tactic().to_owned(),
            annotation,
        }
    }

    /// The identity embedded in the record.
    #[must_use]
    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity::new(&self.technique_id, &self.tactic)
    }

    #[must_use]
    pub fn into_annotation(self) -> Annotation {
        self.annotation
    }
}
