pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{Config, DbSettings};
pub use error::{Error, Result};
pub use store::MarketStore;
pub use types::*;
