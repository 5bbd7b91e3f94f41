//! # catpoint-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for programmatic access
//!   (`/api/status`, `/api/sensors`, `/api/camera/image`, …)
//! - Map HTTP requests into alarm controller calls (driving adapter)
//! - Map controller results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `catpoint-app` (for port traits and services) and
//! `catpoint-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
