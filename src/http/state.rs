//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::{
    AvailabilityCatalog, BookingLedger, NoopDirectory, Notifier, OverlapDiscovery,
    TimePreferenceStore, TracingNotifier, UserDirectory,
};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance, retained for health checks
    pub repository: Arc<dyn FullRepository>,
    pub catalog: AvailabilityCatalog,
    pub ledger: BookingLedger,
    pub preferences: TimePreferenceStore,
    pub overlaps: OverlapDiscovery,
}

impl AppState {
    /// State with the default capabilities: tracing notifications, no user
    /// directory, pairwise overlap engine.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_capabilities(repository, Arc::new(TracingNotifier), Arc::new(NoopDirectory))
    }

    /// State with injected notifier and user directory.
    pub fn with_capabilities(
        repository: Arc<dyn FullRepository>,
        notifier: Arc<dyn Notifier>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let catalog = AvailabilityCatalog::new(repository.clone(), notifier.clone());
        let ledger = BookingLedger::new(repository.clone(), notifier.clone());
        let preferences =
            TimePreferenceStore::new(repository.clone(), notifier.clone(), directory);
        let overlaps = OverlapDiscovery::pairwise(repository.clone());
        Self {
            repository,
            catalog,
            ledger,
            preferences,
            overlaps,
        }
    }

    /// Override the directory lookup batch size for operator aggregate views.
    pub fn with_directory_batch_size(mut self, batch_size: usize) -> Self {
        self.preferences = self.preferences.with_directory_batch_size(batch_size);
        self
    }
}
