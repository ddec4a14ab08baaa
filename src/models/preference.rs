//! User-declared desired time windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{LabelId, PreferenceId, UserId};
use super::slot::ClassType;
use super::time::TimeWindow;

/// A user-declared desired time window. Represents a wish, not a commitment;
/// it has no relationship to any bookable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreference {
    pub id: PreferenceId,
    pub user_id: UserId,
    pub label_id: Option<LabelId>,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub description: Option<String>,
}

/// Input for creating a preference.
///
/// When `label_id` is absent and both `class_type` and `topic` are present,
/// the label is resolved-or-created before the preference is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPreference {
    pub user_id: UserId,
    pub label_id: Option<LabelId>,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub description: Option<String>,
    pub class_type: Option<ClassType>,
    pub topic: Option<String>,
}

/// Partial update for a preference. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencePatch {
    pub label_id: Option<Option<LabelId>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub description: Option<Option<String>>,
}

impl PreferencePatch {
    /// Apply the patch to an existing preference, returning the merged record.
    pub fn apply(&self, pref: &TimePreference) -> TimePreference {
        TimePreference {
            id: pref.id,
            user_id: pref.user_id.clone(),
            label_id: self.label_id.unwrap_or(pref.label_id),
            date: self.date.unwrap_or(pref.date),
            window: TimeWindow::new(
                self.start_time.unwrap_or(pref.window.start),
                self.end_time.unwrap_or(pref.window.end),
            ),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| pref.description.clone()),
        }
    }
}

/// A preference enriched with the owner's display name for operator views.
///
/// The display name comes from an external user directory; when the lookup
/// has no entry it defaults to an empty string rather than failing the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceWithUser {
    pub preference: TimePreference,
    pub display_name: String,
}
