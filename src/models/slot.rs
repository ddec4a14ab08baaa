//! Operator-defined bookable time slots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::SlotId;
use super::time::TimeWindow;

/// Kind of class a slot (or booking/label) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    Individual,
    Group,
}

impl ClassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::Individual => "individual",
            ClassType::Group => "group",
        }
    }
}

impl std::fmt::Display for ClassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator-defined, bookable time window for a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: SlotId,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub class_type: ClassType,
    pub max_participants: u32,
    pub is_active: bool,
    pub is_webinar: bool,
}

/// Check the slot invariants:
/// - `window.end > window.start`
/// - Individual slots hold exactly one participant
/// - Group slots hold at least two
fn validate_slot_fields(
    window: &TimeWindow,
    class_type: ClassType,
    max_participants: u32,
) -> Result<(), String> {
    if !window.is_valid() {
        return Err(format!(
            "slot window must end after it starts (got {})",
            window
        ));
    }
    match class_type {
        ClassType::Individual if max_participants != 1 => Err(format!(
            "individual slots must have max_participants = 1 (got {})",
            max_participants
        )),
        ClassType::Group if max_participants < 2 => Err(format!(
            "group slots must have max_participants >= 2 (got {})",
            max_participants
        )),
        _ => Ok(()),
    }
}

impl AvailabilitySlot {
    /// Validate the full invariant set, e.g. after merging a patch.
    pub fn validate(&self) -> Result<(), String> {
        validate_slot_fields(&self.window, self.class_type, self.max_participants)
    }
}

/// Input for creating a slot; the id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub class_type: ClassType,
    pub max_participants: u32,
    #[serde(default)]
    pub is_webinar: bool,
}

impl NewSlot {
    /// Validate the slot invariants before insertion.
    pub fn validate(&self) -> Result<(), String> {
        validate_slot_fields(&self.window, self.class_type, self.max_participants)
    }
}

/// Partial update for a slot. `None` fields keep their current value; the
/// merged result is re-validated as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub class_type: Option<ClassType>,
    pub max_participants: Option<u32>,
    pub is_active: Option<bool>,
    pub is_webinar: Option<bool>,
}

impl SlotPatch {
    /// Apply the patch to an existing slot, returning the merged slot.
    pub fn apply(&self, slot: &AvailabilitySlot) -> AvailabilitySlot {
        AvailabilitySlot {
            id: slot.id,
            date: self.date.unwrap_or(slot.date),
            window: TimeWindow::new(
                self.start_time.unwrap_or(slot.window.start),
                self.end_time.unwrap_or(slot.window.end),
            ),
            class_type: self.class_type.unwrap_or(slot.class_type),
            max_participants: self.max_participants.unwrap_or(slot.max_participants),
            is_active: self.is_active.unwrap_or(slot.is_active),
            is_webinar: self.is_webinar.unwrap_or(slot.is_webinar),
        }
    }
}
