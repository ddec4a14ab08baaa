//! Booking ledger: user claims against slots, with capacity enforcement.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::error::{degrade_read, ServiceError, ServiceResult};
use super::notify::{Notifier, NotifyKind};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{
    Actor, Booking, BookingId, BookingStatus, BookingWithSlot, NewBooking, SlotId, UserId,
};

/// Service implementing the booking state machine and the capacity invariant.
///
/// State machine: `Pending -> Confirmed` (operator), `Pending | Confirmed ->
/// Cancelled` (owner or operator). Cancelled is terminal.
#[derive(Clone)]
pub struct BookingLedger {
    repo: Arc<dyn FullRepository>,
    notifier: Arc<dyn Notifier>,
}

impl BookingLedger {
    pub fn new(repo: Arc<dyn FullRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { repo, notifier }
    }

    /// Create a booking with status pending.
    ///
    /// The load-count-check-insert sequence runs as one unit guarded by the
    /// slot's booking generation. A stale generation surfaces internally as
    /// `ConcurrencyConflict`, is retried exactly once by re-running the whole
    /// unit, and resolves to `SlotFull` if still contended.
    pub async fn create_booking(&self, request: NewBooking) -> ServiceResult<Booking> {
        let result = match self.try_create(&request).await {
            Err(ServiceError::ConcurrencyConflict(msg)) => {
                debug!(slot_id = %request.slot_id, conflict = %msg, "booking conflicted, retrying once");
                match self.try_create(&request).await {
                    Err(ServiceError::ConcurrencyConflict(_)) => {
                        warn!(slot_id = %request.slot_id, "booking still contended after retry");
                        Err(ServiceError::SlotFull(format!(
                            "Slot {} is contended, try again later",
                            request.slot_id
                        )))
                    }
                    other => other,
                }
            }
            other => other,
        };

        match &result {
            Ok(booking) => {
                info!(booking_id = %booking.id, slot_id = %booking.slot_id, user_id = %booking.user_id, "booking created");
                self.notifier.notify(
                    NotifyKind::Success,
                    &format!(
                        "Booking {} created for slot {} (pending)",
                        booking.id, booking.slot_id
                    ),
                );
            }
            Err(err) => self.notifier.notify(NotifyKind::Failure, &err.to_string()),
        }
        result
    }

    async fn try_create(&self, request: &NewBooking) -> ServiceResult<Booking> {
        let slot = match self.repo.get_slot(request.slot_id).await {
            Ok(slot) => slot,
            Err(RepositoryError::NotFound { .. }) => {
                return Err(ServiceError::SlotUnavailable(format!(
                    "Slot {} does not exist",
                    request.slot_id
                )))
            }
            Err(err) => return Err(err.into()),
        };
        if !slot.is_active {
            return Err(ServiceError::SlotUnavailable(format!(
                "Slot {} is no longer active",
                slot.id
            )));
        }

        let generation = self.repo.slot_generation(request.slot_id).await?;
        let active = self.repo.count_active_for_slot(request.slot_id).await?;
        if active >= slot.max_participants as usize {
            return Err(ServiceError::SlotFull(format!(
                "Slot {} is fully booked ({}/{})",
                slot.id, active, slot.max_participants
            )));
        }
        if self
            .repo
            .find_active_for_user(request.slot_id, &request.user_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::DuplicateBooking(format!(
                "User {} already holds a booking on slot {}",
                request.user_id, slot.id
            )));
        }

        Ok(self.repo.insert_booking(request, generation).await?)
    }

    /// Cancel a booking. Only the owning user or an operator may cancel.
    /// Cancelling an already-cancelled booking is a no-op.
    pub async fn cancel_booking(&self, id: BookingId, actor: &Actor) -> ServiceResult<Booking> {
        let booking = self.repo.get_booking(id).await?;
        if !actor.may_act_for(&booking.user_id) {
            let msg = format!(
                "Only the owner or an operator may cancel booking {}",
                booking.id
            );
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }
        if booking.status == BookingStatus::Cancelled {
            return Ok(booking);
        }

        let cancelled = Booking {
            status: BookingStatus::Cancelled,
            cancelled_at: Some(Utc::now()),
            cancelled_by: Some(actor.user_id.clone()),
            ..booking
        };
        let updated = self.repo.update_booking(&cancelled).await?;
        info!(booking_id = %updated.id, cancelled_by = %actor.user_id, "booking cancelled");
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Booking {} cancelled", updated.id),
        );
        Ok(updated)
    }

    /// Operator-only status transition.
    ///
    /// Allowed: `Pending -> Confirmed`, and any non-terminal status to
    /// `Cancelled`. Cancelled rejects every further transition.
    pub async fn update_status(
        &self,
        id: BookingId,
        new_status: BookingStatus,
        operator: &Actor,
    ) -> ServiceResult<Booking> {
        if !operator.is_operator {
            let msg = format!("Only an operator may change the status of booking {}", id);
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }

        let booking = self.repo.get_booking(id).await?;
        let allowed = match (booking.status, new_status) {
            (BookingStatus::Pending, BookingStatus::Confirmed) => true,
            (BookingStatus::Pending | BookingStatus::Confirmed, BookingStatus::Cancelled) => true,
            _ => false,
        };
        if !allowed {
            let msg = format!(
                "Booking {} cannot transition from {} to {}",
                id, booking.status, new_status
            );
            self.notifier.notify(NotifyKind::Failure, &msg);
            return Err(ServiceError::Validation(msg));
        }

        let updated_booking = if new_status == BookingStatus::Cancelled {
            Booking {
                status: new_status,
                cancelled_at: Some(Utc::now()),
                cancelled_by: Some(operator.user_id.clone()),
                ..booking
            }
        } else {
            Booking {
                status: new_status,
                ..booking
            }
        };
        let updated = self.repo.update_booking(&updated_booking).await?;
        info!(booking_id = %updated.id, status = %updated.status, "booking status updated");
        self.notifier.notify(
            NotifyKind::Success,
            &format!("Booking {} is now {}", updated.id, updated.status),
        );
        Ok(updated)
    }

    /// Pending/confirmed bookings on a slot, ordered by creation time.
    /// Creation order doubles as queue position within capacity.
    pub async fn list_for_slot(&self, slot_id: SlotId) -> ServiceResult<Vec<Booking>> {
        degrade_read(
            self.repo.list_active_for_slot(slot_id).await,
            "list_for_slot",
        )
    }

    /// All of a user's bookings regardless of status, each joined with the
    /// current state of its slot so operator edits show up without
    /// re-issuing the booking.
    pub async fn list_for_user(&self, user_id: &UserId) -> ServiceResult<Vec<BookingWithSlot>> {
        let bookings = degrade_read(self.repo.list_for_user(user_id).await, "list_for_user")?;
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut slot_ids: Vec<SlotId> = Vec::new();
        for booking in &bookings {
            if !slot_ids.contains(&booking.slot_id) {
                slot_ids.push(booking.slot_id);
            }
        }
        let slots = degrade_read(self.repo.get_slots(&slot_ids).await, "list_for_user slots")?;
        let by_id: HashMap<SlotId, _> = slots.into_iter().map(|s| (s.id, s)).collect();

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let slot = by_id.get(&booking.slot_id).cloned();
                BookingWithSlot { booking, slot }
            })
            .collect())
    }
}
