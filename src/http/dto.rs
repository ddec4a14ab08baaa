//! Data Transfer Objects for the REST API.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    Actor, AvailabilitySlot, Booking, BookingStatus, BookingWithSlot, ClassType, LabelId,
    NewBooking, NewPreference, NewSlot, Overlap, PreferenceWithUser, SlotId, TimePreference,
    TimeWindow, UserId,
};

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlotRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub class_type: ClassType,
    pub max_participants: u32,
    #[serde(default)]
    pub is_webinar: bool,
}

impl From<CreateSlotRequest> for NewSlot {
    fn from(req: CreateSlotRequest) -> Self {
        NewSlot {
            date: req.date,
            window: TimeWindow::new(req.start_time, req.end_time),
            class_type: req.class_type,
            max_participants: req.max_participants,
            is_webinar: req.is_webinar,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub slot_id: i64,
    pub user_id: String,
    pub class_type: ClassType,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        NewBooking {
            slot_id: SlotId::new(req.slot_id),
            user_id: UserId::new(req.user_id),
            class_type: req.class_type,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelBookingRequest {
    pub user_id: String,
    #[serde(default)]
    pub operator: bool,
}

impl CancelBookingRequest {
    pub fn actor(&self) -> Actor {
        if self.operator {
            Actor::operator(self.user_id.as_str())
        } else {
            Actor::user(self.user_id.as_str())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    pub operator_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePreferenceRequest {
    pub user_id: String,
    #[serde(default)]
    pub label_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub class_type: Option<ClassType>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl From<CreatePreferenceRequest> for NewPreference {
    fn from(req: CreatePreferenceRequest) -> Self {
        NewPreference {
            user_id: UserId::new(req.user_id),
            label_id: req.label_id.map(LabelId::new),
            date: req.date,
            window: TimeWindow::new(req.start_time, req.end_time),
            description: req.description,
            class_type: req.class_type,
            topic: req.topic,
        }
    }
}

/// Distinguishes an absent field from an explicit `null`: a missing key
/// leaves the outer `Option` as `None` (keep current value), while
/// `"field": null` arrives as `Some(None)` (clear it).
fn tri_state<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePreferenceRequest {
    pub user_id: String,
    #[serde(default)]
    pub operator: bool,
    #[serde(default, deserialize_with = "tri_state")]
    pub label_id: Option<Option<i64>>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "tri_state")]
    pub description: Option<Option<String>>,
}

impl UpdatePreferenceRequest {
    pub fn actor(&self) -> Actor {
        if self.operator {
            Actor::operator(self.user_id.as_str())
        } else {
            Actor::user(self.user_id.as_str())
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Optional inclusive date range; both bounds or neither.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub active_only: bool,
}

/// Caller identity for query-string authenticated endpoints (e.g. DELETE).
#[derive(Debug, Clone, Deserialize)]
pub struct ActorQuery {
    pub user_id: String,
    #[serde(default)]
    pub operator: bool,
}

impl ActorQuery {
    pub fn actor(&self) -> Actor {
        if self.operator {
            Actor::operator(self.user_id.as_str())
        } else {
            Actor::user(self.user_id.as_str())
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotListResponse {
    pub slots: Vec<AvailabilitySlot>,
    pub total: usize,
}

/// Result of a slot deletion: soft-deleted slots are returned, hard deletes
/// leave `slot` empty.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteSlotResponse {
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<AvailabilitySlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserBookingListResponse {
    pub bookings: Vec<BookingWithSlot>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceListResponse {
    pub preferences: Vec<TimePreference>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichedPreferenceListResponse {
    pub preferences: Vec<PreferenceWithUser>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlapListResponse {
    pub overlaps: Vec<Overlap>,
    pub total: usize,
}
