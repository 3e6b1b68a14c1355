//! Domain layer types and invariants.

pub mod slug;
pub mod validate;
