//! # homedash-domain
//!
//! Pure domain model for the homedash switch dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Sessions** (per-browser login state: anonymous or authenticated)
//! - Define the shared **Access token** that is the only login credential
//! - Define **Dashboard settings** (broker connection values and the switch
//!   list handed to the page)
//! - Define **Locations** and **Weather reports** for the weather lookup
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod dashboard;
pub mod session;
pub mod token;
pub mod weather;
