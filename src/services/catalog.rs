//! Availability catalog: operator-authored bookable slots.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::{degrade_read, ServiceError, ServiceResult};
use super::notify::{Notifier, NotifyKind};
use crate::db::repository::FullRepository;
use crate::models::{AvailabilitySlot, DateRange, NewSlot, SlotId, SlotPatch};

/// Service for creating, editing and deactivating availability slots.
///
/// All mutations are operator actions; authorization of the caller happens
/// outside this crate.
#[derive(Clone)]
pub struct AvailabilityCatalog {
    repo: Arc<dyn FullRepository>,
    notifier: Arc<dyn Notifier>,
}

impl AvailabilityCatalog {
    pub fn new(repo: Arc<dyn FullRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { repo, notifier }
    }

    /// Create a slot after validating the slot invariants.
    pub async fn create_slot(&self, new: NewSlot) -> ServiceResult<AvailabilitySlot> {
        if let Err(msg) = new.validate() {
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }
        let slot = self.repo.insert_slot(&new).await?;
        info!(slot_id = %slot.id, date = %slot.date, "slot created");
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Slot {} created for {}", slot.id, slot.date),
        );
        Ok(slot)
    }

    /// Merge `patch` into the slot and re-validate the full invariant set on
    /// the merged result, not just the changed fields.
    pub async fn update_slot(&self, id: SlotId, patch: SlotPatch) -> ServiceResult<AvailabilitySlot> {
        let current = self.repo.get_slot(id).await?;
        let merged = patch.apply(&current);
        if let Err(msg) = merged.validate() {
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }
        let updated = self.repo.update_slot(&merged).await?;
        info!(slot_id = %updated.id, "slot updated");
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Slot {} updated", updated.id),
        );
        Ok(updated)
    }

    /// Delete a slot.
    ///
    /// A slot with live (pending or confirmed) bookings is soft-deleted by
    /// setting `is_active = false`, preserving booking history, and the
    /// updated slot is returned. A slot with no live bookings is removed
    /// entirely and `None` is returned.
    pub async fn delete_slot(&self, id: SlotId) -> ServiceResult<Option<AvailabilitySlot>> {
        let slot = self.repo.get_slot(id).await?;
        let active = self.repo.count_active_for_slot(id).await?;
        if active > 0 {
            let deactivated = AvailabilitySlot {
                is_active: false,
                ..slot
            };
            let updated = self.repo.update_slot(&deactivated).await?;
            debug!(slot_id = %id, active_bookings = active, "slot soft-deleted");
            self.notifier.notify(
                NotifyKind::Success,
                &format!("Slot {} deactivated ({} live bookings kept)", id, active),
            );
            Ok(Some(updated))
        } else {
            self.repo.delete_slot(id).await?;
            debug!(slot_id = %id, "slot hard-deleted");
            self.notifier
                .notify(NotifyKind::Success, &format!("Slot {} deleted", id));
            Ok(None)
        }
    }

    /// List slots ordered by `(date, start)` ascending.
    ///
    /// Degrades to an empty list when the store is transiently unavailable.
    pub async fn list_slots(
        &self,
        range: Option<DateRange>,
        active_only: bool,
    ) -> ServiceResult<Vec<AvailabilitySlot>> {
        degrade_read(self.repo.list_slots(range, active_only).await, "list_slots")
    }
}
