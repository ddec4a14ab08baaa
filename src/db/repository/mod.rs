//! Repository trait definitions.
//!
//! The persistence contract is split per concern, mirroring the four logical
//! collections of the domain: slots, bookings, preferences, and labels.
//! [`FullRepository`] bundles them for callers that need the whole store.

pub mod bookings;
pub mod error;
pub mod labels;
pub mod preferences;
pub mod slots;

pub use bookings::BookingRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use labels::LabelRepository;
pub use preferences::PreferenceRepository;
pub use slots::SlotRepository;

/// Convenience supertrait for backends implementing every collection.
///
/// Implemented explicitly per backend so that `is_available` can reflect the
/// backend's actual connectivity.
pub trait FullRepository:
    SlotRepository + BookingRepository + PreferenceRepository + LabelRepository
{
    /// Lightweight liveness probe for health checks.
    fn is_available(&self) -> bool {
        true
    }
}
