//! # catpoint-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SecurityRepository` — arming status, alarm status and the sensor set
//!   - `ImageClassifier` — "does this camera frame contain a cat?"
//!   - `EventPublisher` — status-change notifications
//! - Define the **driving/inbound** use case:
//!   - `AlarmController` — sensor changes, arming, camera frames, sweeps
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `catpoint-domain` only (plus `tokio::sync` for the operation
//! lock and channels). Never imports adapter crates.

pub mod event_bus;
pub mod ports;
pub mod services;
