//! # homedash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **dashboard** (`/`) behind the shared-token login
//!   (`/login/`, `/logout/`)
//! - Serve the **weather lookup** JSON endpoint (`/get_weather`)
//! - Serve static assets for the page's client-side scripts (`/static`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Sessions
//! The browser only holds an opaque session id in an `HttpOnly` cookie. The
//! login state itself lives behind the `SessionStore` port, so a missing,
//! unknown or expired id is simply anonymous.
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for port traits and services) and
//! `homedash-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod session;
pub mod state;
