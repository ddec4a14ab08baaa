//! # Classbook Backend
//!
//! Booking and shared-availability backend for operator-published class
//! time-slots. Operators author bookable slots, users claim them under a
//! capacity invariant, and users independently declare free-form time
//! preferences from which shared-availability windows are derived.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (slots, bookings, preferences, labels, overlaps)
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: Business logic (catalog, ledger, preference store, overlap engine)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Concurrency
//!
//! Execution is strictly request/response; there is no background scheduler.
//! The only guarded race is concurrent booking creation against a nearly-full
//! slot, which is serialized through an optimistic per-slot generation token
//! (see [`db::repository::BookingRepository`]).

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
