//! Pluggable on-disk formats for locale mapping files.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ParseError;

/// Key → text pairs of one locale file, in key order.
pub type Entries = BTreeMap<String, String>;

/// Turns the text of a locale file into its entries.
///
/// The reconciliation logic only ever sees [`Entries`], so adding a format
/// means implementing this trait and nothing else.
pub trait MappingFormat {
  fn parse(&self, text: &str) -> Result<Entries, ParseError>;
}

/// The formats shipped with glossa. Chosen by configuration rather than by
/// file extension: legacy files are named e.g. `fr.lang`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
  /// A single JSON object of strings.
  #[default]
  Json,
  /// A TOML table of strings.
  Toml,
}

impl MappingFormat for FileFormat {
  fn parse(&self, text: &str) -> Result<Entries, ParseError> {
    match self {
      Self::Json => Ok(serde_json::from_str(text)?),
      Self::Toml => Ok(toml::from_str(text)?),
    }
  }
}
