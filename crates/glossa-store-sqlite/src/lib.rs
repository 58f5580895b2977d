//! SQLite backends for glossa.
//!
//! [`SqliteStore`] is the target locale store; [`SqliteLegacySource`] reads
//! the legacy relational database. Both wrap [`tokio_rusqlite`] so database
//! access runs on a dedicated thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod legacy;

pub use error::{Error, Result};
pub use legacy::SqliteLegacySource;
pub use store::SqliteStore;
