//! # API Shared
//!
//! Shared definitions for the assistant's APIs.
//!
//! Contains:
//! - Request and response types with OpenAPI schemas (`messages` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the workspace binary.

pub mod health;
pub mod messages;

pub use health::HealthService;
pub use messages::*;
