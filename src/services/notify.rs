//! Notification side-channel.
//!
//! Core operations return typed results; whether and how a human is told
//! about them is decided by an injected [`Notifier`]. The concrete delivery
//! mechanism (toast, email, push) lives outside this crate.

/// Outcome category of a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Failure,
}

/// Abstract notification capability injected into services.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotifyKind, message: &str);
}

/// Notifier that routes messages to the tracing subscriber.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Success => tracing::info!(target: "classbook::notify", "{}", message),
            NotifyKind::Failure => tracing::warn!(target: "classbook::notify", "{}", message),
        }
    }
}

/// Notifier that drops everything. Used in tests and embedded contexts.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _kind: NotifyKind, _message: &str) {}
}
