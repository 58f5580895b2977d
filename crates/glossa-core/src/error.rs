//! Error types for `glossa-core`.

use thiserror::Error;

/// Faults raised while resolving relational source rows.
///
/// Every variant other than [`Error::Source`] is a data-integrity fault: the
/// legacy database violates a precondition the migration depends on, and
/// the run must stop.
#[derive(Debug, Error)]
pub enum Error {
  #[error("no language row for language id {0}")]
  LanguageNotFound(i64),

  #[error("language id {language_id} matches {rows} language rows")]
  AmbiguousLanguage { language_id: i64, rows: usize },

  #[error("event {0} has no English detail row")]
  MissingAnchor(i64),

  #[error("event {event_id} has {rows} English detail rows")]
  AmbiguousAnchor { event_id: i64, rows: usize },

  #[error("source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Whether this is a data-integrity fault rather than a backend failure.
  pub fn is_integrity_fault(&self) -> bool { !matches!(self, Self::Source(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
