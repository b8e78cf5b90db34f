pub mod config;
pub mod error;
pub mod seed;
pub mod store;
pub mod task;
pub mod validation;

pub use config::Config;
pub use error::*;
pub use store::TaskStore;
pub use task::*;
