//! Error type for `glossa-migrate`.

use thiserror::Error;

/// A fault that aborts the run. Writes made before it remain valid.
#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("legacy source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Missing or ambiguous language / English anchor rows.
  #[error(transparent)]
  Resolve(#[from] glossa_core::Error),

  #[error(transparent)]
  Files(#[from] glossa_files::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
