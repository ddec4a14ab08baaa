//! Overlap engine: shared-availability discovery over time preferences.
//!
//! Pure computation with no write path; it consumes the full preference set
//! on demand and derives every maximal window, per date, where two or more
//! distinct users' declared windows intersect.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use super::error::ServiceResult;
use crate::db::repository::FullRepository;
use crate::models::{DateRange, Overlap, TimePreference, TimeWindow, UserId};

/// Minimum number of distinct users an emitted overlap must carry.
pub const MIN_PARTICIPANTS: usize = 2;

/// Strategy seam for overlap discovery.
///
/// The default is the pairwise exact-key-merge implementation. A sweep-line
/// variant may be substituted without touching callers, provided it keeps
/// the half-open semantics, the minimum-two-distinct-users filter, and the
/// self-pair exclusion.
pub trait OverlapEngine: Send + Sync {
    fn find_overlaps(&self, preferences: &[TimePreference]) -> Vec<Overlap>;
}

/// Pairwise O(n²)-per-date overlap scan with exact-key merging.
///
/// Overlap windows are merged only when their `(date, start, end)` keys are
/// identical; pairwise overlaps with different spans stay separate records
/// even when they involve a common user. Three users whose pairwise overlaps
/// differ in span are therefore reported as separate two-participant records
/// rather than reconciled into a true multi-way intersection. This is a
/// deliberate, documented trade-off, not a defect to correct here.
pub struct PairwiseOverlapEngine;

impl OverlapEngine for PairwiseOverlapEngine {
    fn find_overlaps(&self, preferences: &[TimePreference]) -> Vec<Overlap> {
        // Preferences never span dates, so each date bucket is independent.
        let mut by_date: BTreeMap<NaiveDate, Vec<&TimePreference>> = BTreeMap::new();
        for pref in preferences {
            by_date.entry(pref.date).or_default().push(pref);
        }

        type OverlapKey = (NaiveDate, NaiveTime, NaiveTime);
        let mut merged: BTreeMap<OverlapKey, BTreeSet<UserId>> = BTreeMap::new();

        for (date, bucket) in &by_date {
            for (i, a) in bucket.iter().enumerate() {
                for b in bucket.iter().skip(i + 1) {
                    // A user's own overlapping preferences are not shared
                    // availability.
                    if a.user_id == b.user_id {
                        continue;
                    }
                    let Some(shared) = a.window.intersection(&b.window) else {
                        continue;
                    };
                    let participants = merged
                        .entry((*date, shared.start, shared.end))
                        .or_default();
                    participants.insert(a.user_id.clone());
                    participants.insert(b.user_id.clone());
                }
            }
        }

        // BTreeMap iteration yields (date, start) ascending order for free.
        let overlaps: Vec<Overlap> = merged
            .into_iter()
            .filter(|(_, users)| users.len() >= MIN_PARTICIPANTS)
            .map(|((date, start, end), user_ids)| Overlap {
                date,
                window: TimeWindow::new(start, end),
                user_ids,
            })
            .collect();

        debug!(
            preferences = preferences.len(),
            overlaps = overlaps.len(),
            "overlap scan complete"
        );
        overlaps
    }
}

/// Read-side entry point wiring the engine to the preference collection.
#[derive(Clone)]
pub struct OverlapDiscovery {
    repo: Arc<dyn FullRepository>,
    engine: Arc<dyn OverlapEngine>,
}

impl OverlapDiscovery {
    pub fn new(repo: Arc<dyn FullRepository>, engine: Arc<dyn OverlapEngine>) -> Self {
        Self { repo, engine }
    }

    /// Construct with the default pairwise engine.
    pub fn pairwise(repo: Arc<dyn FullRepository>) -> Self {
        Self::new(repo, Arc::new(PairwiseOverlapEngine))
    }

    /// Derive shared-availability windows from the current preference set.
    ///
    /// A transiently unavailable store degrades to an empty input set, and
    /// therefore an empty result, rather than failing the caller.
    pub async fn discover(&self, range: Option<DateRange>) -> ServiceResult<Vec<Overlap>> {
        let preferences = super::error::degrade_read(
            self.repo.list_all_preferences(range).await,
            "overlap discovery input",
        )?;
        Ok(self.engine.find_overlaps(&preferences))
    }
}

#[cfg(test)]
#[path = "overlap_tests.rs"]
mod overlap_tests;
