//! User claims against bookable slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BookingId, SlotId, UserId};
use super::slot::{AvailabilitySlot, ClassType};

/// Lifecycle of a booking.
///
/// `Pending -> Confirmed` is an operator action; `Pending | Confirmed ->
/// Cancelled` may be performed by the owner or an operator. Cancelled is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// A booking in this status counts against slot capacity.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's claim against a slot.
///
/// `class_type` is a snapshot taken at creation time; everything else about
/// the slot is read live through the slot reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub slot_id: SlotId,
    pub user_id: UserId,
    pub class_type: ClassType,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<UserId>,
}

/// Input for creating a booking; id, status and timestamps are assigned by
/// the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub slot_id: SlotId,
    pub user_id: UserId,
    pub class_type: ClassType,
    pub notes: Option<String>,
}

/// A booking joined with the current state of its slot.
///
/// The slot is fetched at read time, so operator edits to a slot show up
/// without re-issuing the booking. `slot` is `None` when the slot was
/// hard-deleted after all of its bookings were cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithSlot {
    pub booking: Booking,
    pub slot: Option<AvailabilitySlot>,
}
