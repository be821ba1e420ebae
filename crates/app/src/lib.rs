//! # homedash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SessionStore`: load, save and remove session records
//!   - `WeatherSource`: fetch current conditions for a location
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SessionGate`: login with the shared token, logout, check state
//!   - `WeatherService`: validate a location query and look it up
//! - Provide **in-process infrastructure** (in-memory session store) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio::sync` for locking).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod session_store;
