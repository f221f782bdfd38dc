//! Annotation transfer between an old-layer identity and its new-layer
//! counterpart.
//!
//! After a committed copy the source is disabled and the destination holds
//! the copied state, so the two are never enabled together. Revert undoes the
//! adoption: the destination goes back to the default annotation (not to
//! whatever it held before the copy) and the source is re-enabled.

use nav_core::annotation::Annotation;
use nav_core::identity::ObjectIdentity;

use crate::error::UpgradeError;
use crate::review::ReviewTracker;
use crate::store::AnnotationStore;

fn require_both(
    dst: &ObjectIdentity,
    src: &ObjectIdentity,
    dst_store: &AnnotationStore,
    src_store: &AnnotationStore,
) -> Result<(), UpgradeError> {
    dst_store.require(dst)?;
    src_store.require(src)
}

/// Copy `src`'s annotation into `dst`, disable `src`, and mark `dst` reviewed.
///
/// Repeating a copy leaves both stores as the first copy left them: a source
/// disabled by an earlier copy of the same pair is copied as enabled.
///
/// # Errors
///
/// `IdentityNotFound` if either identity is outside its store's scope;
/// nothing is modified in that case.
pub fn copy(
    dst: &ObjectIdentity,
    src: &ObjectIdentity,
    dst_store: &mut AnnotationStore,
    src_store: &mut AnnotationStore,
    review: &mut ReviewTracker,
) -> Result<(), UpgradeError> {
    require_both(dst, src, dst_store, src_store)?;

    let mut record = src_store.serialize(src);
    if !record.annotation.enabled {
        let before_copy = Annotation {
            enabled: true,
            ..record.annotation.clone()
        };
        if dst_store.get(dst) == &before_copy {
            tracing::debug!(%src, %dst, "copy already applied");
            record.annotation = before_copy;
        }
    }
    dst_store.deserialize(record, dst)?;
    src_store.get_mut(src)?.enabled = false;
    review.mark(dst);

    tracing::info!(%src, %dst, "copied annotations");
    Ok(())
}

/// Reset `dst` to the default annotation, re-enable `src`, and clear
/// `dst`'s review mark.
///
/// # Errors
///
/// `IdentityNotFound` if either identity is outside its store's scope;
/// nothing is modified in that case.
pub fn revert(
    dst: &ObjectIdentity,
    src: &ObjectIdentity,
    dst_store: &mut AnnotationStore,
    src_store: &mut AnnotationStore,
    review: &mut ReviewTracker,
) -> Result<(), UpgradeError> {
    require_both(dst, src, dst_store, src_store)?;

    dst_store.reset(dst);
    let source = src_store.get_mut(src)?;
    source.enabled = true;
    if !source.is_annotated() {
        src_store.reset(src);
    }
    review.unmark(dst);

    tracing::info!(%src, %dst, "reverted annotation copy");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{new_snapshot, old_snapshot};
    use pretty_assertions::assert_eq;

    struct Fixture {
        old: AnnotationStore,
        new: AnnotationStore,
        review: ReviewTracker,
    }

    fn fixture() -> Fixture {
        Fixture {
            old: AnnotationStore::for_snapshot("old", &old_snapshot()),
            new: AnnotationStore::for_snapshot("new", &new_snapshot()),
            review: ReviewTracker::new(),
        }
    }

    fn id(t: &str, tactic: &str) -> ObjectIdentity {
        ObjectIdentity::new(t, tactic)
    }

    #[test]
    fn copy_moves_state_and_disables_source() {
        let mut f = fixture();
        let src = id("T1001", "defense-evasion");
        let dst = id("T1001", "defense-evasion");
        let annotation = Annotation::default().with_score(5.0).with_comment("edr gap");
        f.old.set(&src, annotation.clone()).unwrap();

        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();

        assert_eq!(f.new.get(&dst), &annotation);
        assert!(!f.old.get(&src).enabled);
        assert!(f.review.is_reviewed(&dst));
    }

    #[test]
    fn revert_resets_destination_and_reenables_source() {
        let mut f = fixture();
        let src = id("T1003", "credential-access");
        let dst = id("T1005", "credential-access");
        let annotation = Annotation::default().with_score(3.0);
        f.old.set(&src, annotation.clone()).unwrap();

        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        revert(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();

        assert_eq!(f.new.get(&dst), &Annotation::EMPTY);
        assert_eq!(f.old.get(&src), &annotation);
        assert!(!f.review.is_reviewed(&dst));
    }

    #[test]
    fn revert_discards_pre_copy_destination_content() {
        let mut f = fixture();
        let src = id("T1001", "defense-evasion");
        let dst = id("T1001", "defense-evasion");
        f.old.set(&src, Annotation::default().with_score(1.0)).unwrap();
        f.new.set(&dst, Annotation::default().with_comment("already here")).unwrap();

        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        revert(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        assert_eq!(f.new.get(&dst), &Annotation::EMPTY);
    }

    #[test]
    fn copy_of_unannotated_source_leaves_it_disabled_only() {
        let mut f = fixture();
        let src = id("T1002", "persistence");
        copy(&src, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        assert_eq!(f.new.get(&src), &Annotation::EMPTY);
        assert!(!f.old.get(&src).enabled);

        revert(&src, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        assert_eq!(f.old.annotated().count(), 0);
    }

    #[test]
    fn repeated_copy_keeps_destination_enabled() {
        let mut f = fixture();
        let src = id("T1001", "defense-evasion");
        let dst = id("T1001", "defense-evasion");
        let annotation = Annotation::default().with_score(5.0);
        f.old.set(&src, annotation.clone()).unwrap();

        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        let after_first = (f.new.get(&dst).clone(), f.old.get(&src).clone());
        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();

        assert_eq!((f.new.get(&dst).clone(), f.old.get(&src).clone()), after_first);
        assert!(f.new.get(&dst).enabled);
        assert!(f.review.is_reviewed(&dst));

        revert(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        assert_eq!(f.old.get(&src), &annotation);
    }

    #[test]
    fn disabled_source_is_copied_as_disabled() {
        let mut f = fixture();
        let src = id("T1004", "execution");
        let dst = id("T1001", "defense-evasion");
        let mut annotation = Annotation::default().with_comment("muted");
        annotation.enabled = false;
        f.old.set(&src, annotation.clone()).unwrap();

        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        copy(&dst, &src, &mut f.new, &mut f.old, &mut f.review).unwrap();
        assert_eq!(f.new.get(&dst), &annotation);
    }

    #[test]
    fn out_of_scope_identity_changes_nothing() {
        let mut f = fixture();
        let src = id("T1001", "defense-evasion");
        f.old.set(&src, Annotation::default().with_score(4.0)).unwrap();
        let missing = id("T1002", "defense-evasion"); // dropped from v9

        let err = copy(&missing, &src, &mut f.new, &mut f.old, &mut f.review).unwrap_err();
        assert!(matches!(err, UpgradeError::IdentityNotFound { .. }));
        assert!(f.old.get(&src).enabled);
        assert!(f.review.is_empty());

        let err = revert(&src, &missing, &mut f.new, &mut f.old, &mut f.review).unwrap_err();
        assert!(matches!(err, UpgradeError::IdentityNotFound { .. }));
    }
}
