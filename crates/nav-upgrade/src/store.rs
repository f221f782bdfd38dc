//! Per-layer annotation state.
//!
//! An [`AnnotationStore`] belongs to exactly one (layer, snapshot) pair. Its
//! scope is the set of technique-tactic identities of that snapshot; reads
//! outside the scope return the default annotation, writes outside it fail.

use std::collections::{BTreeMap, BTreeSet};

use nav_core::annotation::{Annotation, AnnotationRecord};
use nav_core::errors::CoreError;
use nav_core::identity::ObjectIdentity;
use nav_core::snapshot::Snapshot;

use crate::error::UpgradeError;
use crate::source::Dataset;

static DEFAULT_ANNOTATION: Annotation = Annotation::EMPTY;

/// Annotation overrides keyed by identity. Identities without an override
/// read as [`Annotation::EMPTY`].
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    layer: String,
    version: String,
    scope: BTreeSet<ObjectIdentity>,
    annotations: BTreeMap<ObjectIdentity, Annotation>,
}

impl AnnotationStore {
    /// An empty store scoped to every identity of `snapshot`.
    #[must_use]
    pub fn for_snapshot(layer: impl Into<String>, snapshot: &Snapshot) -> Self {
        Self {
            layer: layer.into(),
            version: snapshot.version.clone(),
            scope: snapshot.all_identities().collect(),
            annotations: BTreeMap::new(),
        }
    }

    /// Name of the layer this store belongs to.
    #[must_use]
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Snapshot version this store is scoped to.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether `identity` exists in this store's snapshot.
    #[must_use]
    pub fn contains(&self, identity: &ObjectIdentity) -> bool {
        self.scope.contains(identity)
    }

    /// Fail with `IdentityNotFound` unless `identity` is in scope.
    ///
    /// # Errors
    ///
    /// `UpgradeError::IdentityNotFound` when out of scope.
    pub fn require(&self, identity: &ObjectIdentity) -> Result<(), UpgradeError> {
        if self.contains(identity) {
            Ok(())
        } else {
            Err(UpgradeError::IdentityNotFound {
                identity: identity.clone(),
                layer: self.layer.clone(),
            })
        }
    }

    /// The annotation of `identity`, or the default when none is stored.
    #[must_use]
    pub fn get(&self, identity: &ObjectIdentity) -> &Annotation {
        self.annotations.get(identity).unwrap_or(&DEFAULT_ANNOTATION)
    }

    /// Mutable access, materializing a default entry if needed.
    ///
    /// # Errors
    ///
    /// `UpgradeError::IdentityNotFound` when out of scope.
    pub fn get_mut(&mut self, identity: &ObjectIdentity) -> Result<&mut Annotation, UpgradeError> {
        self.require(identity)?;
        Ok(self.annotations.entry(identity.clone()).or_default())
    }

    /// Replace the annotation of `identity`. Storing the default annotation
    /// is the same as [`Self::reset`].
    ///
    /// # Errors
    ///
    /// `UpgradeError::IdentityNotFound` when out of scope.
    pub fn set(&mut self, identity: &ObjectIdentity, annotation: Annotation) -> Result<(), UpgradeError> {
        self.require(identity)?;
        if annotation.is_annotated() {
            self.annotations.insert(identity.clone(), annotation);
        } else {
            self.annotations.remove(identity);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_annotated(&self, identity: &ObjectIdentity) -> bool {
        self.get(identity).is_annotated()
    }

    /// Restore the default annotation of `identity`.
    pub fn reset(&mut self, identity: &ObjectIdentity) {
        self.annotations.remove(identity);
    }

    /// Portable record of `identity`'s annotation.
    #[must_use]
    pub fn serialize(&self, identity: &ObjectIdentity) -> AnnotationRecord {
        AnnotationRecord::new(identity, self.get(identity).clone())
    }

    /// Store `record`'s annotation under `identity`. The identity embedded in
    /// the record is ignored, so a record taken from another technique or
    /// version binds to the destination.
    ///
    /// # Errors
    ///
    /// `UpgradeError::IdentityNotFound` when out of scope.
    pub fn deserialize(&mut self, record: AnnotationRecord, identity: &ObjectIdentity) -> Result<(), UpgradeError> {
        self.set(identity, record.into_annotation())
    }

    /// Every identity whose annotation differs from the default.
    pub fn annotated(&self) -> impl Iterator<Item = (&ObjectIdentity, &Annotation)> {
        self.annotations.iter().filter(|(_, a)| a.is_annotated())
    }

    /// Records of every annotated identity, in identity order.
    #[must_use]
    pub fn records(&self) -> Vec<AnnotationRecord> {
        self.annotated()
            .map(|(id, a)| AnnotationRecord::new(id, a.clone()))
            .collect()
    }

    /// Import records under their embedded identities. Records outside the
    /// scope are not imported and are handed back to the caller.
    pub fn load_records(&mut self, records: impl IntoIterator<Item = AnnotationRecord>) -> Vec<AnnotationRecord> {
        let mut skipped = Vec::new();
        for record in records {
            let identity = record.identity();
            if let Err(error) = self.require(&identity) {
                tracing::warn!(%identity, layer = %self.layer, %error, "keeping annotation record outside snapshot");
                skipped.push(record);
                continue;
            }
            let annotation = record.into_annotation();
            if annotation.is_annotated() {
                self.annotations.insert(identity, annotation);
            } else {
                self.annotations.remove(&identity);
            }
        }
        skipped
    }
}

/// One annotated dataset bound to one snapshot.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub version: String,
    pub domain_id: String,
    store: AnnotationStore,
    unresolved: Vec<AnnotationRecord>,
}

impl Layer {
    /// A layer with no annotations for `snapshot`.
    #[must_use]
    pub fn empty(name: impl Into<String>, snapshot: &Snapshot) -> Self {
        let name = name.into();
        Self {
            store: AnnotationStore::for_snapshot(name.clone(), snapshot),
            name,
            version: snapshot.version.clone(),
            domain_id: snapshot.domain_id.clone(),
            unresolved: Vec::new(),
        }
    }

    /// Build a layer from a stored dataset and the snapshot it targets.
    ///
    /// # Errors
    ///
    /// `UpgradeError::Core` if the dataset targets a different version or
    /// domain than `snapshot`.
    pub fn from_dataset(dataset: &Dataset, snapshot: &Snapshot) -> Result<Self, UpgradeError> {
        if dataset.version != snapshot.version || dataset.domain_id != snapshot.domain_id {
            return Err(CoreError::Validation(format!(
                "dataset '{}' targets {}/{} but snapshot is {}/{}",
                dataset.id, dataset.domain_id, dataset.version, snapshot.domain_id, snapshot.version
            ))
            .into());
        }
        let mut layer = Self::empty(&dataset.name, snapshot);
        layer.unresolved = layer.store.load_records(dataset.techniques.iter().cloned());
        tracing::debug!(
            dataset = %dataset.id,
            loaded = dataset.techniques.len() - layer.unresolved.len(),
            unresolved = layer.unresolved.len(),
            "loaded layer annotations"
        );
        Ok(layer)
    }

    #[must_use]
    pub const fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut AnnotationStore {
        &mut self.store
    }

    /// Records read from the dataset whose identity is not in the snapshot.
    #[must_use]
    pub fn unresolved(&self) -> &[AnnotationRecord] {
        &self.unresolved
    }

    /// Dataset form of this layer: annotated records followed by the
    /// unresolved records it was loaded with.
    #[must_use]
    pub fn to_dataset(&self, id: impl Into<String>, compare_to: Option<String>) -> Dataset {
        Dataset {
            id: id.into(),
            name: self.name.clone(),
            version: self.version.clone(),
            domain_id: self.domain_id.clone(),
            compare_to,
            techniques: self
                .store
                .records()
                .into_iter()
                .chain(self.unresolved.iter().cloned())
                .collect(),
        }
    }
}
