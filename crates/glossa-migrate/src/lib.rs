//! Migration driver for glossa.
//!
//! [`Migrator`] feeds either locale files or the legacy relational database
//! into a [`LocaleStore`](glossa_core::store::LocaleStore) and reports what
//! it wrote. Every write is idempotent, so a run can be repeated (or resumed
//! after a failure) without cleanup. Runs must not overlap against the same
//! target database.

pub mod config;
pub mod error;
pub mod migrator;

pub use config::{EnglishIdentity, MigrateConfig};
pub use error::{Error, Result};
pub use migrator::Migrator;

#[cfg(test)]
mod tests;
