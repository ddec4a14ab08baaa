//! Integration tests for the time preference store: label resolution,
//! ownership rules, filters, and the enriched operator view.

mod support;

use std::sync::Arc;

use classbook::db::repositories::LocalRepository;
use classbook::db::repository::LabelRepository;
use classbook::models::{
    Actor, ClassType, DateRange, LabelId, NewPreference, PreferencePatch, UserId,
    DEFAULT_LABEL_COLOR,
};
use classbook::services::{
    NullNotifier, ServiceError, StaticDirectory, TimePreferenceStore,
};
use support::*;

#[tokio::test]
async fn test_create_preference_without_label() {
    let repo = repo();
    let store = preference_store(&repo);

    let pref = store
        .create_preference(preference("alice", 1, (9, 0), (10, 0)))
        .await
        .unwrap();
    assert_eq!(pref.user_id, UserId::new("alice"));
    assert!(pref.label_id.is_none());
}

#[tokio::test]
async fn test_invalid_window_rejected() {
    let repo = repo();
    let store = preference_store(&repo);

    let err = store
        .create_preference(preference("alice", 1, (10, 0), (9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = store
        .create_preference(preference("alice", 1, (9, 0), (9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_type_topic_pair_creates_label_once() {
    let repo = repo();
    let store = preference_store(&repo);

    let first = store
        .create_preference(NewPreference {
            class_type: Some(ClassType::Group),
            topic: Some("conversation".to_string()),
            ..preference("alice", 1, (9, 0), (10, 0))
        })
        .await
        .unwrap();
    let label_id = first.label_id.expect("label created implicitly");

    let label = repo.get_label(label_id).await.unwrap();
    assert_eq!(label.name, "conversation");
    assert_eq!(label.topic, "conversation");
    assert_eq!(label.class_type, ClassType::Group);
    assert_eq!(label.color, DEFAULT_LABEL_COLOR);

    // The same pair resolves to the existing label instead of a duplicate.
    let second = store
        .create_preference(NewPreference {
            class_type: Some(ClassType::Group),
            topic: Some("conversation".to_string()),
            ..preference("bob", 2, (14, 0), (15, 0))
        })
        .await
        .unwrap();
    assert_eq!(second.label_id, Some(label_id));
    assert_eq!(repo.list_labels().await.unwrap().len(), 1);

    // A different class type for the same topic is a distinct label.
    let third = store
        .create_preference(NewPreference {
            class_type: Some(ClassType::Individual),
            topic: Some("conversation".to_string()),
            ..preference("carol", 2, (14, 0), (15, 0))
        })
        .await
        .unwrap();
    assert_ne!(third.label_id, Some(label_id));
    assert_eq!(repo.list_labels().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dangling_label_reference_is_not_found() {
    let repo = repo();
    let store = preference_store(&repo);

    let err = store
        .create_preference(NewPreference {
            label_id: Some(LabelId::new(777)),
            ..preference("alice", 1, (9, 0), (10, 0))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_update_requires_owner_or_operator() {
    let repo = repo();
    let store = preference_store(&repo);

    let pref = store
        .create_preference(preference("alice", 1, (9, 0), (10, 0)))
        .await
        .unwrap();

    let patch = PreferencePatch {
        description: Some(Some("morning works best".to_string())),
        ..Default::default()
    };
    let err = store
        .update_preference(pref.id, patch.clone(), &Actor::user("mallory"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let updated = store
        .update_preference(pref.id, patch.clone(), &Actor::user("alice"))
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("morning works best"));

    // Operators may moderate other users' preferences.
    let moderated = store
        .update_preference(
            pref.id,
            PreferencePatch {
                description: Some(None),
                ..Default::default()
            },
            &Actor::operator("admin"),
        )
        .await
        .unwrap();
    assert!(moderated.description.is_none());
}

#[tokio::test]
async fn test_update_window_is_revalidated() {
    let repo = repo();
    let store = preference_store(&repo);

    let pref = store
        .create_preference(preference("alice", 1, (9, 0), (10, 0)))
        .await
        .unwrap();

    let err = store
        .update_preference(
            pref.id,
            PreferencePatch {
                end_time: Some(t(8, 0)),
                ..Default::default()
            },
            &Actor::user("alice"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let updated = store
        .update_preference(
            pref.id,
            PreferencePatch {
                start_time: Some(t(9, 30)),
                ..Default::default()
            },
            &Actor::user("alice"),
        )
        .await
        .unwrap();
    assert_eq!(updated.window.start, t(9, 30));
    assert_eq!(updated.window.end, t(10, 0));
}

#[tokio::test]
async fn test_update_can_clear_label() {
    let repo = repo();
    let store = preference_store(&repo);

    let pref = store
        .create_preference(NewPreference {
            class_type: Some(ClassType::Group),
            topic: Some("grammar".to_string()),
            ..preference("alice", 1, (9, 0), (10, 0))
        })
        .await
        .unwrap();
    assert!(pref.label_id.is_some());

    let cleared = store
        .update_preference(
            pref.id,
            PreferencePatch {
                label_id: Some(None),
                ..Default::default()
            },
            &Actor::user("alice"),
        )
        .await
        .unwrap();
    assert!(cleared.label_id.is_none());
}

#[tokio::test]
async fn test_delete_requires_owner_or_operator() {
    let repo = repo();
    let store = preference_store(&repo);

    let pref = store
        .create_preference(preference("alice", 1, (9, 0), (10, 0)))
        .await
        .unwrap();

    let err = store
        .delete_preference(pref.id, &Actor::user("mallory"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    store
        .delete_preference(pref.id, &Actor::operator("admin"))
        .await
        .unwrap();

    let err = store
        .delete_preference(pref.id, &Actor::operator("admin"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_list_for_user_with_date_filter() {
    let repo = repo();
    let store = preference_store(&repo);

    store
        .create_preference(preference("alice", 1, (9, 0), (10, 0)))
        .await
        .unwrap();
    store
        .create_preference(preference("alice", 3, (9, 0), (10, 0)))
        .await
        .unwrap();
    store
        .create_preference(preference("bob", 1, (9, 0), (10, 0)))
        .await
        .unwrap();

    let all = store.list_for_user(&"alice".into(), None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].date, d(1));
    assert_eq!(all[1].date, d(3));

    let filtered = store
        .list_for_user(&"alice".into(), Some(DateRange::new(d(2), d(4))))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].date, d(3));
}

#[tokio::test]
async fn test_enriched_view_resolves_display_names() {
    let repo: Arc<dyn classbook::db::repository::FullRepository> =
        Arc::new(LocalRepository::new());
    let directory = StaticDirectory::new([
        (UserId::new("alice"), "Alice Smith".to_string()),
        (UserId::new("bob"), "Bob Jones".to_string()),
    ]);
    let store = TimePreferenceStore::new(
        repo.clone(),
        Arc::new(NullNotifier),
        Arc::new(directory),
    )
    .with_directory_batch_size(1);

    store
        .create_preference(preference("alice", 1, (9, 0), (10, 0)))
        .await
        .unwrap();
    store
        .create_preference(preference("bob", 1, (9, 30), (10, 30)))
        .await
        .unwrap();
    store
        .create_preference(preference("ghost", 1, (11, 0), (12, 0)))
        .await
        .unwrap();

    let enriched = store.list_all_enriched(None).await.unwrap();
    assert_eq!(enriched.len(), 3);

    let name_for = |user: &str| {
        enriched
            .iter()
            .find(|p| p.preference.user_id == UserId::new(user))
            .map(|p| p.display_name.clone())
            .unwrap()
    };
    assert_eq!(name_for("alice"), "Alice Smith");
    assert_eq!(name_for("bob"), "Bob Jones");
    // Unknown ids fall back to an empty display name.
    assert_eq!(name_for("ghost"), "");
}
