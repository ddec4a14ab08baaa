//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::dto::{
    ActorQuery, BookingListResponse, CancelBookingRequest, CreateBookingRequest,
    CreatePreferenceRequest, CreateSlotRequest, DateRangeQuery, DeleteSlotResponse,
    EnrichedPreferenceListResponse, HealthResponse, OverlapListResponse, PreferenceListResponse,
    SlotListQuery, SlotListResponse, UpdateBookingStatusRequest, UpdatePreferenceRequest,
    UserBookingListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    Actor, AvailabilitySlot, Booking, BookingId, DateRange, LabelId, PreferenceId, PreferencePatch,
    SlotId, SlotPatch, TimePreference, UserId,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Build an optional date range from query bounds; both or neither.
fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Option<DateRange>, AppError> {
    match (from, to) {
        (Some(from), Some(to)) if from <= to => Ok(Some(DateRange::new(from, to))),
        (Some(from), Some(to)) => Err(AppError::BadRequest(format!(
            "Invalid date range: {} is after {}",
            from, to
        ))),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "Date range requires both 'from' and 'to'".to_string(),
        )),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = if state.repository.is_available() {
        "connected".to_string()
    } else {
        "disconnected".to_string()
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store: store_status,
    }))
}

// =============================================================================
// Slots
// =============================================================================

/// POST /v1/slots
///
/// Create a new availability slot.
pub async fn create_slot(
    State(state): State<AppState>,
    Json(request): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<AvailabilitySlot>), AppError> {
    let slot = state.catalog.create_slot(request.into()).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// GET /v1/slots
///
/// List slots ordered by (date, start time).
pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotListQuery>,
) -> HandlerResult<SlotListResponse> {
    let range = date_range(query.from, query.to)?;
    let slots = state.catalog.list_slots(range, query.active_only).await?;
    let total = slots.len();
    Ok(Json(SlotListResponse { slots, total }))
}

/// PATCH /v1/slots/{slot_id}
///
/// Merge partial fields into a slot; the merged slot is re-validated as a
/// whole.
pub async fn update_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
    Json(patch): Json<SlotPatch>,
) -> HandlerResult<AvailabilitySlot> {
    let slot = state.catalog.update_slot(SlotId::new(slot_id), patch).await?;
    Ok(Json(slot))
}

/// DELETE /v1/slots/{slot_id}
///
/// Hard-delete a slot without live bookings; soft-delete (deactivate) one
/// that has them.
pub async fn delete_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
) -> HandlerResult<DeleteSlotResponse> {
    let slot = state.catalog.delete_slot(SlotId::new(slot_id)).await?;
    Ok(Json(DeleteSlotResponse {
        deleted: slot.is_none(),
        slot,
    }))
}

// =============================================================================
// Bookings
// =============================================================================

/// POST /v1/bookings
///
/// Create a booking (status pending) against a slot.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.ledger.create_booking(request.into()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// POST /v1/bookings/{booking_id}/cancel
///
/// Cancel a booking; owner or operator only. Idempotent.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<CancelBookingRequest>,
) -> HandlerResult<Booking> {
    let booking = state
        .ledger
        .cancel_booking(BookingId::new(booking_id), &request.actor())
        .await?;
    Ok(Json(booking))
}

/// PATCH /v1/bookings/{booking_id}/status
///
/// Operator-only status transition.
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> HandlerResult<Booking> {
    let operator = Actor::operator(request.operator_id.as_str());
    let booking = state
        .ledger
        .update_status(BookingId::new(booking_id), request.status, &operator)
        .await?;
    Ok(Json(booking))
}

/// GET /v1/slots/{slot_id}/bookings
///
/// Pending/confirmed bookings for a slot in creation order.
pub async fn list_slot_bookings(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
) -> HandlerResult<BookingListResponse> {
    let bookings = state.ledger.list_for_slot(SlotId::new(slot_id)).await?;
    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}

/// GET /v1/users/{user_id}/bookings
///
/// All of a user's bookings joined with the live state of their slots.
pub async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<UserBookingListResponse> {
    let bookings = state.ledger.list_for_user(&UserId::new(user_id)).await?;
    let total = bookings.len();
    Ok(Json(UserBookingListResponse { bookings, total }))
}

// =============================================================================
// Preferences
// =============================================================================

/// POST /v1/preferences
///
/// Create a time preference, resolving or creating its label when a
/// (class_type, topic) pair is supplied without a label id.
pub async fn create_preference(
    State(state): State<AppState>,
    Json(request): Json<CreatePreferenceRequest>,
) -> Result<(StatusCode, Json<TimePreference>), AppError> {
    let pref = state.preferences.create_preference(request.into()).await?;
    Ok((StatusCode::CREATED, Json(pref)))
}

/// PATCH /v1/preferences/{preference_id}
///
/// Merge partial fields into a preference; owner or operator only.
pub async fn update_preference(
    State(state): State<AppState>,
    Path(preference_id): Path<i64>,
    Json(request): Json<UpdatePreferenceRequest>,
) -> HandlerResult<TimePreference> {
    let actor = request.actor();
    let patch = PreferencePatch {
        label_id: request.label_id.map(|id| id.map(LabelId::new)),
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        description: request.description,
    };
    let pref = state
        .preferences
        .update_preference(PreferenceId::new(preference_id), patch, &actor)
        .await?;
    Ok(Json(pref))
}

/// DELETE /v1/preferences/{preference_id}
///
/// Delete a preference; owner or operator only.
pub async fn delete_preference(
    State(state): State<AppState>,
    Path(preference_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<StatusCode, AppError> {
    state
        .preferences
        .delete_preference(PreferenceId::new(preference_id), &query.actor())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/users/{user_id}/preferences
///
/// A user's preferences, optionally date-filtered.
pub async fn list_user_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<PreferenceListResponse> {
    let range = date_range(query.from, query.to)?;
    let preferences = state
        .preferences
        .list_for_user(&UserId::new(user_id), range)
        .await?;
    let total = preferences.len();
    Ok(Json(PreferenceListResponse { preferences, total }))
}

/// GET /v1/preferences
///
/// Operator aggregate of all preferences, enriched with display names.
pub async fn list_all_preferences(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<EnrichedPreferenceListResponse> {
    let range = date_range(query.from, query.to)?;
    let preferences = state.preferences.list_all_enriched(range).await?;
    let total = preferences.len();
    Ok(Json(EnrichedPreferenceListResponse { preferences, total }))
}

// =============================================================================
// Overlaps
// =============================================================================

/// GET /v1/overlaps
///
/// Shared-availability windows derived from the current preference set.
pub async fn list_overlaps(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<OverlapListResponse> {
    let range = date_range(query.from, query.to)?;
    let overlaps = state.overlaps.discover(range).await?;
    let total = overlaps.len();
    Ok(Json(OverlapListResponse { overlaps, total }))
}
