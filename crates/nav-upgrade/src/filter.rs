//! Changelog filtering.
//!
//! Filtering keeps the category structure and the order inside each
//! category; it only drops entities. It holds no state, so callers re-run
//! it whenever the filter toggle changes.

use nav_core::changelog::VersionChangelog;
use nav_core::entities::Technique;
use nav_core::enums::ChangelogCategory;

use crate::store::AnnotationStore;

/// Keep, per category, the entities for which `predicate` holds.
#[must_use]
pub fn filter<P>(changelog: &VersionChangelog, mut predicate: P) -> VersionChangelog
where
    P: FnMut(&Technique) -> bool,
{
    let mut filtered = VersionChangelog::empty(&changelog.old_version, &changelog.new_version);
    for category in ChangelogCategory::ALL {
        *filtered.category_mut(category) = changelog
            .category(category)
            .iter()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect();
    }
    tracing::debug!(
        before = changelog.len(),
        after = filtered.len(),
        "filtered changelog"
    );
    filtered
}

/// Predicate: any identity derived from the entity is annotated in `store`.
pub fn annotated_in(store: &AnnotationStore) -> impl Fn(&Technique) -> bool + '_ {
    move |entity| {
        entity
            .identities()
            .iter()
            .any(|identity| store.is_annotated(identity))
    }
}
