//! Application layer: collection controllers and the machinery behind them.

pub mod controller;
pub mod error;
pub mod forms;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod stream;
