//! Infrastructure layer: remote API access, HTTP surface, telemetry.

pub mod api;
pub mod error;
pub mod http;
pub mod telemetry;
