//! Labels categorize time preferences by `(class type, topic)`.

use serde::{Deserialize, Serialize};

use super::ids::LabelId;
use super::slot::ClassType;

/// A named category attached to time preferences.
///
/// Labels are the only entity with implicit upsert semantics: a preference
/// submitted without an explicit `label_id` but with a `(class_type, topic)`
/// pair resolves to the existing label with that exact pair, or creates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub class_type: ClassType,
    pub topic: String,
    pub color: String,
}

/// Input for creating a label; the id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLabel {
    pub name: String,
    pub class_type: ClassType,
    pub topic: String,
    pub color: String,
}

impl NewLabel {
    /// Label derived from a `(class_type, topic)` pair on an unlabelled
    /// preference submission.
    pub fn from_type_topic(class_type: ClassType, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        Self {
            name: topic.clone(),
            class_type,
            topic,
            color: DEFAULT_LABEL_COLOR.to_string(),
        }
    }
}

/// Color assigned to implicitly created labels.
pub const DEFAULT_LABEL_COLOR: &str = "#9ca3af";
