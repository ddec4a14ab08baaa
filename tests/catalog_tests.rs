//! Integration tests for the availability catalog: slot invariants, partial
//! updates, and the soft/hard delete split.

mod support;

use classbook::db::repository::{RepositoryError, SlotRepository};
use classbook::models::{ClassType, NewBooking, NewSlot, SlotPatch};
use classbook::services::ServiceError;
use support::*;

#[tokio::test]
async fn test_create_valid_slots() {
    let repo = repo();
    let catalog = catalog(&repo);

    let individual = catalog.create_slot(individual_slot(1)).await.unwrap();
    assert_eq!(individual.class_type, ClassType::Individual);
    assert_eq!(individual.max_participants, 1);
    assert!(individual.is_active);

    let group = catalog.create_slot(group_slot(1, 5)).await.unwrap();
    assert_eq!(group.class_type, ClassType::Group);
    assert_eq!(group.max_participants, 5);
}

#[tokio::test]
async fn test_individual_slot_requires_single_participant() {
    let repo = repo();
    let catalog = catalog(&repo);

    let mut slot = individual_slot(1);
    slot.max_participants = 2;
    let err = catalog.create_slot(slot).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_group_slot_requires_at_least_two() {
    let repo = repo();
    let catalog = catalog(&repo);

    let err = catalog.create_slot(group_slot(1, 1)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = catalog.create_slot(group_slot(1, 0)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_slot_window_must_be_ordered() {
    let repo = repo();
    let catalog = catalog(&repo);

    let slot = NewSlot {
        window: window((10, 0), (9, 0)),
        ..individual_slot(1)
    };
    let err = catalog.create_slot(slot).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let empty = NewSlot {
        window: window((10, 0), (10, 0)),
        ..individual_slot(1)
    };
    let err = catalog.create_slot(empty).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_update_merges_and_revalidates_whole_slot() {
    let repo = repo();
    let catalog = catalog(&repo);

    let slot = catalog.create_slot(group_slot(1, 3)).await.unwrap();

    // Switching class type without adjusting capacity violates the merged
    // invariant set even though the changed field alone is fine.
    let patch = SlotPatch {
        class_type: Some(ClassType::Individual),
        ..Default::default()
    };
    let err = catalog.update_slot(slot.id, patch).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Adjusting both fields together passes.
    let patch = SlotPatch {
        class_type: Some(ClassType::Individual),
        max_participants: Some(1),
        ..Default::default()
    };
    let updated = catalog.update_slot(slot.id, patch).await.unwrap();
    assert_eq!(updated.class_type, ClassType::Individual);
    assert_eq!(updated.max_participants, 1);
}

#[tokio::test]
async fn test_update_window_endpoint_only() {
    let repo = repo();
    let catalog = catalog(&repo);

    let slot = catalog.create_slot(group_slot(1, 2)).await.unwrap();
    let patch = SlotPatch {
        end_time: Some(t(11, 30)),
        ..Default::default()
    };
    let updated = catalog.update_slot(slot.id, patch).await.unwrap();
    assert_eq!(updated.window.start, t(9, 0));
    assert_eq!(updated.window.end, t(11, 30));

    // Dragging the end before the existing start is rejected.
    let patch = SlotPatch {
        end_time: Some(t(8, 0)),
        ..Default::default()
    };
    let err = catalog.update_slot(slot.id, patch).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_update_missing_slot_is_not_found() {
    let repo = repo();
    let catalog = catalog(&repo);

    let err = catalog
        .update_slot(classbook::models::SlotId::new(999), SlotPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_without_bookings_removes_slot() {
    let repo = repo();
    let catalog = catalog(&repo);

    let slot = catalog.create_slot(group_slot(1, 2)).await.unwrap();
    let result = catalog.delete_slot(slot.id).await.unwrap();
    assert!(result.is_none());

    let err = repo.get_slot(slot.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_with_live_booking_soft_deletes() {
    let repo = repo();
    let catalog = catalog(&repo);
    let ledger = ledger(&repo);

    let slot = catalog.create_slot(group_slot(1, 2)).await.unwrap();
    ledger
        .create_booking(NewBooking {
            slot_id: slot.id,
            user_id: "u1".into(),
            class_type: slot.class_type,
            notes: None,
        })
        .await
        .unwrap();

    let result = catalog.delete_slot(slot.id).await.unwrap();
    let deactivated = result.expect("soft delete returns the updated slot");
    assert!(!deactivated.is_active);

    // Lookup by id still succeeds; booking history is preserved.
    let fetched = repo.get_slot(slot.id).await.unwrap();
    assert!(!fetched.is_active);
}

#[tokio::test]
async fn test_list_slots_ordering_and_filters() {
    let repo = repo();
    let catalog = catalog(&repo);

    let late = NewSlot {
        window: window((14, 0), (15, 0)),
        ..group_slot(2, 2)
    };
    let early = NewSlot {
        window: window((8, 0), (9, 0)),
        ..group_slot(2, 2)
    };
    let other_day = group_slot(1, 2);

    catalog.create_slot(late).await.unwrap();
    catalog.create_slot(early).await.unwrap();
    let first = catalog.create_slot(other_day).await.unwrap();

    let all = catalog.list_slots(None, false).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].window.start, t(8, 0));
    assert_eq!(all[2].window.start, t(14, 0));

    // Date filter
    let day_two = catalog
        .list_slots(Some(classbook::models::DateRange::single(d(2))), false)
        .await
        .unwrap();
    assert_eq!(day_two.len(), 2);

    // Active-only filter
    catalog
        .update_slot(
            first.id,
            SlotPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let active = catalog.list_slots(None, true).await.unwrap();
    assert_eq!(active.len(), 2);
}
