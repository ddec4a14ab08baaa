//! Derived shared-availability windows.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::time::TimeWindow;

/// A time window where two or more distinct users' preferences intersect.
///
/// Overlaps are derived on demand from the current preference set and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub user_ids: BTreeSet<UserId>,
}

impl Overlap {
    /// Number of distinct participating users.
    pub fn participant_count(&self) -> usize {
        self.user_ids.len()
    }
}
