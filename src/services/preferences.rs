//! Time preference store: user-declared desired time windows.

use std::sync::Arc;

use tracing::{debug, info};

use super::directory::{resolve_display_names, UserDirectory, DIRECTORY_BATCH_SIZE};
use super::error::{degrade_read, ServiceError, ServiceResult};
use super::notify::{Notifier, NotifyKind};
use crate::db::repository::FullRepository;
use crate::models::{
    Actor, DateRange, NewLabel, NewPreference, PreferenceId, PreferencePatch, PreferenceWithUser,
    TimePreference, UserId,
};

/// Service for authoring and querying time preferences.
///
/// Preferences represent wishes, not commitments; they never reference a
/// bookable slot.
#[derive(Clone)]
pub struct TimePreferenceStore {
    repo: Arc<dyn FullRepository>,
    notifier: Arc<dyn Notifier>,
    directory: Arc<dyn UserDirectory>,
    directory_batch_size: usize,
}

impl TimePreferenceStore {
    pub fn new(
        repo: Arc<dyn FullRepository>,
        notifier: Arc<dyn Notifier>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            repo,
            notifier,
            directory,
            directory_batch_size: DIRECTORY_BATCH_SIZE,
        }
    }

    /// Override the directory lookup batch size.
    pub fn with_directory_batch_size(mut self, batch_size: usize) -> Self {
        self.directory_batch_size = batch_size.max(1);
        self
    }

    /// Create a preference.
    ///
    /// When `label_id` is absent and a `(class_type, topic)` pair is given,
    /// the label is resolved by exact match or created before the preference
    /// is persisted. This is the only implicit upsert in the system.
    pub async fn create_preference(&self, new: NewPreference) -> ServiceResult<TimePreference> {
        if !new.window.is_valid() {
            let msg = format!(
                "preference window must end after it starts (got {})",
                new.window
            );
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }

        let mut new = new;
        match (new.label_id, new.class_type, new.topic.as_deref()) {
            (Some(label_id), _, _) => {
                // Explicit label: surface NotFound for dangling references.
                self.repo.get_label(label_id).await?;
            }
            (None, Some(class_type), Some(topic)) => {
                let label = match self
                    .repo
                    .find_label_by_type_topic(class_type, topic)
                    .await?
                {
                    Some(existing) => existing,
                    None => {
                        let created = self
                            .repo
                            .insert_label(&NewLabel::from_type_topic(class_type, topic))
                            .await?;
                        debug!(label_id = %created.id, topic = %created.topic, "label created implicitly");
                        created
                    }
                };
                new.label_id = Some(label.id);
            }
            _ => {}
        }

        let pref = self.repo.insert_preference(&new).await?;
        info!(preference_id = %pref.id, user_id = %pref.user_id, date = %pref.date, "preference created");
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Preference {} saved for {}", pref.id, pref.date),
        );
        Ok(pref)
    }

    /// Update a preference. Only the owner (or an operator, for moderation)
    /// may edit.
    pub async fn update_preference(
        &self,
        id: PreferenceId,
        patch: PreferencePatch,
        actor: &Actor,
    ) -> ServiceResult<TimePreference> {
        let current = self.repo.get_preference(id).await?;
        if !actor.may_act_for(&current.user_id) {
            let msg = format!("Only the owner or an operator may edit preference {}", id);
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }
        if let Some(Some(label_id)) = patch.label_id {
            self.repo.get_label(label_id).await?;
        }

        let merged = patch.apply(&current);
        if !merged.window.is_valid() {
            let msg = format!(
                "preference window must end after it starts (got {})",
                merged.window
            );
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }
        let updated = self.repo.update_preference(&merged).await?;
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Preference {} updated", updated.id),
        );
        Ok(updated)
    }

    /// Delete a preference. Only the owner (or an operator) may delete.
    pub async fn delete_preference(&self, id: PreferenceId, actor: &Actor) -> ServiceResult<()> {
        let current = self.repo.get_preference(id).await?;
        if !actor.may_act_for(&current.user_id) {
            let msg = format!("Only the owner or an operator may delete preference {}", id);
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }
        self.repo.delete_preference(id).await?;
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Preference {} deleted", id),
        );
        Ok(())
    }

    /// A user's preferences, optionally date-filtered.
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
        range: Option<DateRange>,
    ) -> ServiceResult<Vec<TimePreference>> {
        degrade_read(
            self.repo.list_preferences_for_user(user_id, range).await,
            "list_preferences_for_user",
        )
    }

    /// All preferences across users; operator-facing aggregate.
    pub async fn list_all(&self, range: Option<DateRange>) -> ServiceResult<Vec<TimePreference>> {
        degrade_read(
            self.repo.list_all_preferences(range).await,
            "list_all_preferences",
        )
    }

    /// All preferences enriched with the owners' display names.
    ///
    /// Display names come from the external directory in bounded batches; a
    /// missing name defaults to an empty string rather than failing the view.
    pub async fn list_all_enriched(
        &self,
        range: Option<DateRange>,
    ) -> ServiceResult<Vec<PreferenceWithUser>> {
        let prefs = self.list_all(range).await?;
        let ids: Vec<UserId> = prefs.iter().map(|p| p.user_id.clone()).collect();
        let names =
            resolve_display_names(self.directory.as_ref(), &ids, self.directory_batch_size).await;

        Ok(prefs
            .into_iter()
            .map(|preference| {
                let display_name = names
                    .get(&preference.user_id)
                    .cloned()
                    .unwrap_or_default();
                PreferenceWithUser {
                    preference,
                    display_name,
                }
            })
            .collect())
    }
}
