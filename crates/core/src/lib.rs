//! # Cartent Core
//!
//! Domain types and the slot availability engine for the vehicle pickup
//! appointment service. This crate performs no I/O: bookings are handed in
//! as values, "now" comes from an injected [`clock::Clock`], and persistence
//! lives in `cartent-db`.

pub mod availability;
pub mod clock;
pub mod errors;
pub mod format;
pub mod models;
