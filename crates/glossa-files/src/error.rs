//! Error types for `glossa-files`.

use std::path::PathBuf;

use thiserror::Error;

/// A file's content is not a flat string → string mapping.
#[derive(Debug, Error)]
pub enum ParseError {
  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("toml: {0}")]
  Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed mapping file {path:?}: {source}")]
  Parse {
    path:   PathBuf,
    #[source]
    source: ParseError,
  },

  /// The file name yields no usable locale (not UTF-8, or empty stem).
  #[error("cannot derive a locale from {0:?}")]
  InvalidFileName(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
