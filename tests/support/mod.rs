#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use classbook::db::repositories::LocalRepository;
use classbook::db::repository::{
    BookingRepository, FullRepository, LabelRepository, PreferenceRepository, RepositoryError,
    RepositoryResult, SlotRepository,
};
use classbook::models::{
    AvailabilitySlot, Booking, BookingId, ClassType, DateRange, Label, LabelId, NewBooking,
    NewLabel, NewPreference, NewSlot, PreferenceId, SlotId, TimePreference, TimeWindow, UserId,
};
use classbook::services::{
    AvailabilityCatalog, BookingLedger, NoopDirectory, NullNotifier, TimePreferenceStore,
};

pub fn repo() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

pub fn catalog(repo: &Arc<dyn FullRepository>) -> AvailabilityCatalog {
    AvailabilityCatalog::new(repo.clone(), Arc::new(NullNotifier))
}

pub fn ledger(repo: &Arc<dyn FullRepository>) -> BookingLedger {
    BookingLedger::new(repo.clone(), Arc::new(NullNotifier))
}

pub fn preference_store(repo: &Arc<dyn FullRepository>) -> TimePreferenceStore {
    TimePreferenceStore::new(repo.clone(), Arc::new(NullNotifier), Arc::new(NoopDirectory))
}

pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
    TimeWindow::new(t(start.0, start.1), t(end.0, end.1))
}

pub fn group_slot(day: u32, max_participants: u32) -> NewSlot {
    NewSlot {
        date: d(day),
        window: window((9, 0), (10, 0)),
        class_type: ClassType::Group,
        max_participants,
        is_webinar: false,
    }
}

pub fn individual_slot(day: u32) -> NewSlot {
    NewSlot {
        date: d(day),
        window: window((9, 0), (10, 0)),
        class_type: ClassType::Individual,
        max_participants: 1,
        is_webinar: false,
    }
}

pub fn preference(
    user: &str,
    day: u32,
    start: (u32, u32),
    end: (u32, u32),
) -> NewPreference {
    NewPreference {
        user_id: UserId::new(user),
        label_id: None,
        date: d(day),
        window: window(start, end),
        description: None,
        class_type: None,
        topic: None,
    }
}

/// Repository stub whose every operation fails with the configured error.
/// Models a store that is unreachable, slow, or broken.
pub struct FailingStore {
    error: fn() -> RepositoryError,
}

impl FailingStore {
    pub fn connection() -> Self {
        Self {
            error: || RepositoryError::connection("store offline"),
        }
    }

    pub fn timeout() -> Self {
        Self {
            error: || RepositoryError::timeout("store timed out"),
        }
    }

    pub fn query() -> Self {
        Self {
            error: || RepositoryError::query("malformed query"),
        }
    }

    fn err(&self) -> RepositoryError {
        (self.error)()
    }
}

#[async_trait]
impl SlotRepository for FailingStore {
    async fn insert_slot(&self, _slot: &NewSlot) -> RepositoryResult<AvailabilitySlot> {
        Err(self.err())
    }

    async fn get_slot(&self, _id: SlotId) -> RepositoryResult<AvailabilitySlot> {
        Err(self.err())
    }

    async fn get_slots(&self, _ids: &[SlotId]) -> RepositoryResult<Vec<AvailabilitySlot>> {
        Err(self.err())
    }

    async fn update_slot(&self, _slot: &AvailabilitySlot) -> RepositoryResult<AvailabilitySlot> {
        Err(self.err())
    }

    async fn delete_slot(&self, _id: SlotId) -> RepositoryResult<()> {
        Err(self.err())
    }

    async fn list_slots(
        &self,
        _range: Option<DateRange>,
        _active_only: bool,
    ) -> RepositoryResult<Vec<AvailabilitySlot>> {
        Err(self.err())
    }
}

#[async_trait]
impl BookingRepository for FailingStore {
    async fn slot_generation(&self, _slot_id: SlotId) -> RepositoryResult<u64> {
        Err(self.err())
    }

    async fn count_active_for_slot(&self, _slot_id: SlotId) -> RepositoryResult<usize> {
        Err(self.err())
    }

    async fn find_active_for_user(
        &self,
        _slot_id: SlotId,
        _user_id: &UserId,
    ) -> RepositoryResult<Option<Booking>> {
        Err(self.err())
    }

    async fn insert_booking(
        &self,
        _booking: &NewBooking,
        _expected_generation: u64,
    ) -> RepositoryResult<Booking> {
        Err(self.err())
    }

    async fn get_booking(&self, _id: BookingId) -> RepositoryResult<Booking> {
        Err(self.err())
    }

    async fn update_booking(&self, _booking: &Booking) -> RepositoryResult<Booking> {
        Err(self.err())
    }

    async fn list_active_for_slot(&self, _slot_id: SlotId) -> RepositoryResult<Vec<Booking>> {
        Err(self.err())
    }

    async fn list_for_user(&self, _user_id: &UserId) -> RepositoryResult<Vec<Booking>> {
        Err(self.err())
    }
}

#[async_trait]
impl PreferenceRepository for FailingStore {
    async fn insert_preference(&self, _pref: &NewPreference) -> RepositoryResult<TimePreference> {
        Err(self.err())
    }

    async fn get_preference(&self, _id: PreferenceId) -> RepositoryResult<TimePreference> {
        Err(self.err())
    }

    async fn update_preference(
        &self,
        _pref: &TimePreference,
    ) -> RepositoryResult<TimePreference> {
        Err(self.err())
    }

    async fn delete_preference(&self, _id: PreferenceId) -> RepositoryResult<()> {
        Err(self.err())
    }

    async fn list_preferences_for_user(
        &self,
        _user_id: &UserId,
        _range: Option<DateRange>,
    ) -> RepositoryResult<Vec<TimePreference>> {
        Err(self.err())
    }

    async fn list_all_preferences(
        &self,
        _range: Option<DateRange>,
    ) -> RepositoryResult<Vec<TimePreference>> {
        Err(self.err())
    }
}

#[async_trait]
impl LabelRepository for FailingStore {
    async fn insert_label(&self, _label: &NewLabel) -> RepositoryResult<Label> {
        Err(self.err())
    }

    async fn get_label(&self, _id: LabelId) -> RepositoryResult<Label> {
        Err(self.err())
    }

    async fn find_label_by_type_topic(
        &self,
        _class_type: ClassType,
        _topic: &str,
    ) -> RepositoryResult<Option<Label>> {
        Err(self.err())
    }

    async fn list_labels(&self) -> RepositoryResult<Vec<Label>> {
        Err(self.err())
    }
}

impl FullRepository for FailingStore {
    fn is_available(&self) -> bool {
        false
    }
}
