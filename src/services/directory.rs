//! User display-name lookup for operator aggregate views.
//!
//! Identity lives outside this crate; the directory is the read-only seam
//! through which aggregate views resolve display data for opaque user ids.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::models::UserId;

/// Default chunk size for batched directory lookups.
pub const DIRECTORY_BATCH_SIZE: usize = 50;

/// External user directory.
///
/// Implementations may omit ids they have no entry for; callers default the
/// display name to an empty string in that case.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn display_names(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, String>;
}

/// Directory with no data. Every lookup resolves to an empty string.
pub struct NoopDirectory;

#[async_trait]
impl UserDirectory for NoopDirectory {
    async fn display_names(
        &self,
        _user_ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, String> {
        Ok(HashMap::new())
    }
}

/// Static in-memory directory, mainly for tests and demos.
pub struct StaticDirectory {
    names: HashMap<UserId, String>,
}

impl StaticDirectory {
    pub fn new(entries: impl IntoIterator<Item = (UserId, String)>) -> Self {
        Self {
            names: entries.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn display_names(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, String> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.names.get(id).map(|n| (id.clone(), n.clone())))
            .collect())
    }
}

/// Typed two-phase fetch-and-merge for display names.
///
/// Deduplicates `ids`, queries the directory in chunks of `batch_size`, and
/// merges the results. A failed chunk is logged and treated as having no
/// entries; aggregate views must not fail on missing display data.
pub async fn resolve_display_names(
    directory: &dyn UserDirectory,
    ids: &[UserId],
    batch_size: usize,
) -> HashMap<UserId, String> {
    let mut unique: Vec<UserId> = Vec::new();
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }

    let batch_size = batch_size.max(1);
    let mut merged = HashMap::with_capacity(unique.len());
    for chunk in unique.chunks(batch_size) {
        match directory.display_names(chunk).await {
            Ok(names) => merged.extend(names),
            Err(err) => {
                tracing::warn!(error = %err, "directory lookup failed for a batch of {} ids", chunk.len());
            }
        }
    }
    merged
}
