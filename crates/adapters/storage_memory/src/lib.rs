//! # catpoint-adapter-storage-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the `SecurityRepository` port defined in `catpoint-app::ports::storage`
//! - Keep arming status, alarm status and the sensor set for the lifetime of
//!   the process
//!
//! ## Dependency rule
//! Depends on `catpoint-app` (for port traits) and `catpoint-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod security_repo;

pub use error::StorageError;
pub use security_repo::InMemorySecurityRepository;
