//! # catpoint-domain
//!
//! Pure domain model for the catpoint home security system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Sensors** (door, window and motion contacts with an active flag)
//! - Define the **arming** and **alarm** statuses
//! - Define the **alarm rules** deciding how the alarm status moves
//! - Define **Events** (status-change records for the notifier)
//! - Define **camera images** handed to the classifier
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod alarm;
pub mod event;
pub mod image;
pub mod sensor;
pub mod status;
