//! Label repository trait for preference categorization.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ClassType, Label, LabelId, NewLabel};

/// Repository trait for label operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// Insert a new label and assign its id.
    async fn insert_label(&self, label: &NewLabel) -> RepositoryResult<Label>;

    /// Fetch a label by id.
    async fn get_label(&self, id: LabelId) -> RepositoryResult<Label>;

    /// Find a label by exact `(class_type, topic)` match.
    async fn find_label_by_type_topic(
        &self,
        class_type: ClassType,
        topic: &str,
    ) -> RepositoryResult<Option<Label>>;

    /// List all labels, ordered by id ascending.
    async fn list_labels(&self) -> RepositoryResult<Vec<Label>>;
}
