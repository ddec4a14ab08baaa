//! Preference repository trait for user time-preference storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{DateRange, NewPreference, PreferenceId, TimePreference, UserId};

/// Repository trait for time preference operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Insert a new preference and assign its id.
    ///
    /// `label_id` must already be resolved; the resolve-or-create step for
    /// `(class_type, topic)` pairs happens in the preference service.
    async fn insert_preference(&self, pref: &NewPreference) -> RepositoryResult<TimePreference>;

    /// Fetch a preference by id.
    async fn get_preference(&self, id: PreferenceId) -> RepositoryResult<TimePreference>;

    /// Replace a preference's stored state (matched by `pref.id`).
    async fn update_preference(&self, pref: &TimePreference) -> RepositoryResult<TimePreference>;

    /// Remove a preference.
    async fn delete_preference(&self, id: PreferenceId) -> RepositoryResult<()>;

    /// Preferences owned by a user, optionally date-filtered, ordered by
    /// `(date, start)` ascending.
    async fn list_preferences_for_user(
        &self,
        user_id: &UserId,
        range: Option<DateRange>,
    ) -> RepositoryResult<Vec<TimePreference>>;

    /// All preferences across users, optionally date-filtered, ordered by
    /// `(date, start)` ascending.
    async fn list_all_preferences(
        &self,
        range: Option<DateRange>,
    ) -> RepositoryResult<Vec<TimePreference>>;
}
