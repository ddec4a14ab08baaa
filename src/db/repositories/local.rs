//! In-memory repository implementation.
//!
//! Backs unit tests and local development. All collections live behind a
//! single `parking_lot::RwLock`, so every repository method is atomic with
//! respect to the others; the per-slot generation token is still maintained
//! so the ledger's check-then-insert contract is exercised the same way it
//! would be against a remote store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::db::repository::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::repository::{
    BookingRepository, FullRepository, LabelRepository, PreferenceRepository, SlotRepository,
};
use crate::models::{
    AvailabilitySlot, Booking, BookingId, BookingStatus, ClassType, DateRange, Label, LabelId,
    NewBooking, NewLabel, NewPreference, NewSlot, PreferenceId, SlotId, TimePreference, UserId,
};

#[derive(Default)]
struct State {
    next_slot_id: i64,
    next_booking_id: i64,
    next_preference_id: i64,
    next_label_id: i64,
    slots: BTreeMap<i64, AvailabilitySlot>,
    bookings: BTreeMap<i64, Booking>,
    preferences: BTreeMap<i64, TimePreference>,
    labels: BTreeMap<i64, Label>,
    // Bumped on every mutation that can change a slot's active-booking count.
    slot_generations: HashMap<i64, u64>,
}

impl State {
    fn next_slot_id(&mut self) -> i64 {
        self.next_slot_id += 1;
        self.next_slot_id
    }

    fn next_booking_id(&mut self) -> i64 {
        self.next_booking_id += 1;
        self.next_booking_id
    }

    fn next_preference_id(&mut self) -> i64 {
        self.next_preference_id += 1;
        self.next_preference_id
    }

    fn next_label_id(&mut self) -> i64 {
        self.next_label_id += 1;
        self.next_label_id
    }

    fn generation(&self, slot_id: SlotId) -> u64 {
        self.slot_generations.get(&slot_id.value()).copied().unwrap_or(0)
    }

    fn bump_generation(&mut self, slot_id: SlotId) {
        *self.slot_generations.entry(slot_id.value()).or_insert(0) += 1;
    }
}

/// In-memory repository for unit testing and local development.
pub struct LocalRepository {
    state: RwLock<State>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

// In-memory state is always reachable.
impl FullRepository for LocalRepository {}

fn slot_not_found(id: SlotId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Slot {} not found", id),
        ErrorContext::default().with_entity("slot").with_entity_id(id),
    )
}

fn booking_not_found(id: BookingId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Booking {} not found", id),
        ErrorContext::default()
            .with_entity("booking")
            .with_entity_id(id),
    )
}

fn preference_not_found(id: PreferenceId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Preference {} not found", id),
        ErrorContext::default()
            .with_entity("preference")
            .with_entity_id(id),
    )
}

#[async_trait]
impl SlotRepository for LocalRepository {
    async fn insert_slot(&self, slot: &NewSlot) -> RepositoryResult<AvailabilitySlot> {
        let mut state = self.state.write();
        let id = state.next_slot_id();
        let stored = AvailabilitySlot {
            id: SlotId::new(id),
            date: slot.date,
            window: slot.window,
            class_type: slot.class_type,
            max_participants: slot.max_participants,
            is_active: true,
            is_webinar: slot.is_webinar,
        };
        state.slots.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_slot(&self, id: SlotId) -> RepositoryResult<AvailabilitySlot> {
        let state = self.state.read();
        state
            .slots
            .get(&id.value())
            .cloned()
            .ok_or_else(|| slot_not_found(id))
    }

    async fn get_slots(&self, ids: &[SlotId]) -> RepositoryResult<Vec<AvailabilitySlot>> {
        let state = self.state.read();
        Ok(ids
            .iter()
            .filter_map(|id| state.slots.get(&id.value()).cloned())
            .collect())
    }

    async fn update_slot(&self, slot: &AvailabilitySlot) -> RepositoryResult<AvailabilitySlot> {
        let mut state = self.state.write();
        if !state.slots.contains_key(&slot.id.value()) {
            return Err(slot_not_found(slot.id));
        }
        state.slots.insert(slot.id.value(), slot.clone());
        Ok(slot.clone())
    }

    async fn delete_slot(&self, id: SlotId) -> RepositoryResult<()> {
        let mut state = self.state.write();
        state
            .slots
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| slot_not_found(id))
    }

    async fn list_slots(
        &self,
        range: Option<DateRange>,
        active_only: bool,
    ) -> RepositoryResult<Vec<AvailabilitySlot>> {
        let state = self.state.read();
        let mut slots: Vec<AvailabilitySlot> = state
            .slots
            .values()
            .filter(|s| range.map_or(true, |r| r.contains(s.date)))
            .filter(|s| !active_only || s.is_active)
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.date, s.window.start, s.id));
        Ok(slots)
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn slot_generation(&self, slot_id: SlotId) -> RepositoryResult<u64> {
        Ok(self.state.read().generation(slot_id))
    }

    async fn count_active_for_slot(&self, slot_id: SlotId) -> RepositoryResult<usize> {
        let state = self.state.read();
        Ok(state
            .bookings
            .values()
            .filter(|b| b.slot_id == slot_id && b.status.is_active())
            .count())
    }

    async fn find_active_for_user(
        &self,
        slot_id: SlotId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<Booking>> {
        let state = self.state.read();
        Ok(state
            .bookings
            .values()
            .find(|b| b.slot_id == slot_id && b.user_id == *user_id && b.status.is_active())
            .cloned())
    }

    async fn insert_booking(
        &self,
        booking: &NewBooking,
        expected_generation: u64,
    ) -> RepositoryResult<Booking> {
        let mut state = self.state.write();
        let current = state.generation(booking.slot_id);
        if current != expected_generation {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "Slot {} booking generation moved from {} to {}",
                    booking.slot_id, expected_generation, current
                ),
                ErrorContext::new("insert_booking")
                    .with_entity("booking")
                    .with_details(format!("slot_id={}", booking.slot_id)),
            ));
        }
        let id = state.next_booking_id();
        let stored = Booking {
            id: BookingId::new(id),
            slot_id: booking.slot_id,
            user_id: booking.user_id.clone(),
            class_type: booking.class_type,
            notes: booking.notes.clone(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            cancelled_at: None,
            cancelled_by: None,
        };
        state.bookings.insert(id, stored.clone());
        state.bump_generation(booking.slot_id);
        Ok(stored)
    }

    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking> {
        let state = self.state.read();
        state
            .bookings
            .get(&id.value())
            .cloned()
            .ok_or_else(|| booking_not_found(id))
    }

    async fn update_booking(&self, booking: &Booking) -> RepositoryResult<Booking> {
        let mut state = self.state.write();
        let previous = state
            .bookings
            .get(&booking.id.value())
            .cloned()
            .ok_or_else(|| booking_not_found(booking.id))?;
        state.bookings.insert(booking.id.value(), booking.clone());
        if previous.status.is_active() != booking.status.is_active() {
            state.bump_generation(booking.slot_id);
        }
        Ok(booking.clone())
    }

    async fn list_active_for_slot(&self, slot_id: SlotId) -> RepositoryResult<Vec<Booking>> {
        let state = self.state.read();
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.slot_id == slot_id && b.status.is_active())
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.created_at, b.id));
        Ok(bookings)
    }

    async fn list_for_user(&self, user_id: &UserId) -> RepositoryResult<Vec<Booking>> {
        let state = self.state.read();
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.user_id == *user_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.created_at, b.id));
        Ok(bookings)
    }
}

#[async_trait]
impl PreferenceRepository for LocalRepository {
    async fn insert_preference(&self, pref: &NewPreference) -> RepositoryResult<TimePreference> {
        let mut state = self.state.write();
        let id = state.next_preference_id();
        let stored = TimePreference {
            id: PreferenceId::new(id),
            user_id: pref.user_id.clone(),
            label_id: pref.label_id,
            date: pref.date,
            window: pref.window,
            description: pref.description.clone(),
        };
        state.preferences.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_preference(&self, id: PreferenceId) -> RepositoryResult<TimePreference> {
        let state = self.state.read();
        state
            .preferences
            .get(&id.value())
            .cloned()
            .ok_or_else(|| preference_not_found(id))
    }

    async fn update_preference(&self, pref: &TimePreference) -> RepositoryResult<TimePreference> {
        let mut state = self.state.write();
        if !state.preferences.contains_key(&pref.id.value()) {
            return Err(preference_not_found(pref.id));
        }
        state.preferences.insert(pref.id.value(), pref.clone());
        Ok(pref.clone())
    }

    async fn delete_preference(&self, id: PreferenceId) -> RepositoryResult<()> {
        let mut state = self.state.write();
        state
            .preferences
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| preference_not_found(id))
    }

    async fn list_preferences_for_user(
        &self,
        user_id: &UserId,
        range: Option<DateRange>,
    ) -> RepositoryResult<Vec<TimePreference>> {
        let state = self.state.read();
        let mut prefs: Vec<TimePreference> = state
            .preferences
            .values()
            .filter(|p| p.user_id == *user_id)
            .filter(|p| range.map_or(true, |r| r.contains(p.date)))
            .cloned()
            .collect();
        prefs.sort_by_key(|p| (p.date, p.window.start, p.id));
        Ok(prefs)
    }

    async fn list_all_preferences(
        &self,
        range: Option<DateRange>,
    ) -> RepositoryResult<Vec<TimePreference>> {
        let state = self.state.read();
        let mut prefs: Vec<TimePreference> = state
            .preferences
            .values()
            .filter(|p| range.map_or(true, |r| r.contains(p.date)))
            .cloned()
            .collect();
        prefs.sort_by_key(|p| (p.date, p.window.start, p.id));
        Ok(prefs)
    }
}

#[async_trait]
impl LabelRepository for LocalRepository {
    async fn insert_label(&self, label: &NewLabel) -> RepositoryResult<Label> {
        let mut state = self.state.write();
        let id = state.next_label_id();
        let stored = Label {
            id: LabelId::new(id),
            name: label.name.clone(),
            class_type: label.class_type,
            topic: label.topic.clone(),
            color: label.color.clone(),
        };
        state.labels.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_label(&self, id: LabelId) -> RepositoryResult<Label> {
        let state = self.state.read();
        state.labels.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Label {} not found", id),
                ErrorContext::default()
                    .with_entity("label")
                    .with_entity_id(id),
            )
        })
    }

    async fn find_label_by_type_topic(
        &self,
        class_type: ClassType,
        topic: &str,
    ) -> RepositoryResult<Option<Label>> {
        let state = self.state.read();
        Ok(state
            .labels
            .values()
            .find(|l| l.class_type == class_type && l.topic == topic)
            .cloned())
    }

    async fn list_labels(&self) -> RepositoryResult<Vec<Label>> {
        let state = self.state.read();
        Ok(state.labels.values().cloned().collect())
    }
}
