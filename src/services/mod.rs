//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository traits. Each is
//! constructed with an `Arc<dyn FullRepository>` plus the capabilities it
//! needs (notifier, user directory) and owns one component of the domain:
//!
//! - [`catalog::AvailabilityCatalog`]: operator-authored bookable slots
//! - [`ledger::BookingLedger`]: user claims with capacity enforcement
//! - [`preferences::TimePreferenceStore`]: user time wishes + label upsert
//! - [`overlap::OverlapDiscovery`]: derived shared-availability windows

pub mod catalog;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod overlap;
pub mod preferences;

pub use catalog::AvailabilityCatalog;
pub use directory::{NoopDirectory, StaticDirectory, UserDirectory, DIRECTORY_BATCH_SIZE};
pub use error::{ServiceError, ServiceResult};
pub use ledger::BookingLedger;
pub use notify::{Notifier, NotifyKind, NullNotifier, TracingNotifier};
pub use overlap::{OverlapDiscovery, OverlapEngine, PairwiseOverlapEngine, MIN_PARTICIPANTS};
pub use preferences::TimePreferenceStore;
