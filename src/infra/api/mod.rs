//! Remote platform API access.

mod client;
mod resources;

pub use client::{ApiClient, ApiError};
pub use resources::{AssociationClient, ResourceClient};
