//! Slot repository trait for availability slot storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{AvailabilitySlot, DateRange, NewSlot, SlotId};

/// Repository trait for availability slot operations.
///
/// The catalog service validates slot invariants before calling these
/// methods; implementations only store and retrieve.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Insert a new slot and assign its id. New slots start active.
    async fn insert_slot(&self, slot: &NewSlot) -> RepositoryResult<AvailabilitySlot>;

    /// Fetch a slot by id.
    ///
    /// # Returns
    /// * `Ok(AvailabilitySlot)` - The slot
    /// * `Err(RepositoryError::NotFound)` - If no slot has this id
    async fn get_slot(&self, id: SlotId) -> RepositoryResult<AvailabilitySlot>;

    /// Fetch several slots at once, in input order, skipping missing ids.
    ///
    /// Used by read-aggregation paths to avoid per-row round trips.
    async fn get_slots(&self, ids: &[SlotId]) -> RepositoryResult<Vec<AvailabilitySlot>>;

    /// Replace a slot's stored state with `slot` (matched by `slot.id`).
    async fn update_slot(&self, slot: &AvailabilitySlot) -> RepositoryResult<AvailabilitySlot>;

    /// Remove a slot entirely.
    async fn delete_slot(&self, id: SlotId) -> RepositoryResult<()>;

    /// List slots, optionally restricted to a date range and/or active slots,
    /// ordered by `(date, start)` ascending.
    async fn list_slots(
        &self,
        range: Option<DateRange>,
        active_only: bool,
    ) -> RepositoryResult<Vec<AvailabilitySlot>>;
}
