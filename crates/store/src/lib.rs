//! Storage for the `stocks` and `stock_prices` tables.
//!
//! - [`connect`] / [`run_migrations`] manage the SQLite pool and schema.
//! - [`SqliteStore`] implements [`common::MarketStore`] with runtime-checked
//!   queries and owns bulk seeding and schema verification.
//! - [`MemoryStore`] implements the same trait over in-process data.

pub mod connection;
pub mod memory;
pub mod sqlite;
pub mod verify;

pub use connection::{connect, run_migrations};
pub use memory::MemoryStore;
pub use sqlite::{SeedReport, SqliteStore};
pub use verify::{SchemaReport, TableStat};
