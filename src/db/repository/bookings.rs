//! Booking repository trait with the capacity-guard primitive.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Booking, BookingId, NewBooking, SlotId, UserId};

/// Repository trait for booking operations.
///
/// # Capacity guard
///
/// `create_booking` in the ledger is a count-check-then-insert unit that must
/// not interleave with another insert on the same slot. The repository
/// exposes an optimistic per-slot *generation* token: every mutation that can
/// change a slot's active-booking count bumps the generation, and
/// [`insert_booking`](BookingRepository::insert_booking) rejects the write
/// with a retryable `ConflictError` when the caller's generation is stale.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Current booking generation for a slot. Starts at 0 for slots with no
    /// booking history.
    async fn slot_generation(&self, slot_id: SlotId) -> RepositoryResult<u64>;

    /// Count bookings on a slot with status in {pending, confirmed}.
    async fn count_active_for_slot(&self, slot_id: SlotId) -> RepositoryResult<usize>;

    /// Find the user's non-cancelled booking on a slot, if any.
    async fn find_active_for_user(
        &self,
        slot_id: SlotId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<Booking>>;

    /// Insert a new booking with status pending, guarded by the slot
    /// generation observed before the capacity check.
    ///
    /// # Returns
    /// * `Ok(Booking)` - The stored booking with assigned id and timestamps
    /// * `Err(RepositoryError::ConflictError)` - If the slot's generation
    ///   moved since `expected_generation` was read
    async fn insert_booking(
        &self,
        booking: &NewBooking,
        expected_generation: u64,
    ) -> RepositoryResult<Booking>;

    /// Fetch a booking by id.
    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking>;

    /// Replace a booking's stored state with `booking` (matched by
    /// `booking.id`). Bumps the slot generation when the active-booking
    /// count may have changed.
    async fn update_booking(&self, booking: &Booking) -> RepositoryResult<Booking>;

    /// Pending/confirmed bookings for a slot, ordered by `created_at`
    /// ascending. Creation order doubles as queue position within capacity.
    async fn list_active_for_slot(&self, slot_id: SlotId) -> RepositoryResult<Vec<Booking>>;

    /// All bookings for a user regardless of status, ordered by `created_at`
    /// ascending.
    async fn list_for_user(&self, user_id: &UserId) -> RepositoryResult<Vec<Booking>>;
}
