//! HTTP handlers, grouped by resource.

pub mod doc;
pub mod error;
pub mod health;
pub mod tasks;

pub use health::health;
pub use tasks::*;
