//! Error type for `glossa-store-sqlite`.

use glossa_core::definition::DefinitionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A translation referenced a definition that does not exist.
  #[error("definition not found: {0}")]
  DefinitionNotFound(DefinitionId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
