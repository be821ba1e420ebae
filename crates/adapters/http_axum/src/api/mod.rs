//! JSON API handler modules.

pub mod weather;
