//! Core types and trait definitions for the glossa locale store.
//!
//! This crate is deliberately free of database and file-format dependencies.
//! Storage backends implement [`store::LocaleStore`] and
//! [`legacy::LegacySource`]; the migration driver depends only on those
//! traits.

pub mod definition;
pub mod error;
pub mod legacy;
pub mod report;
pub mod resolve;
pub mod store;
pub mod translation;

pub use error::{Error, Result};
