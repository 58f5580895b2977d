//! Definitions — the canonical, language-neutral half of the locale store.
//!
//! A definition is identified either by an explicit key (its *variant*) or,
//! when it has none, by its literal text. Definitions are append-only: once
//! written, only their timestamps are ever touched.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row identifier of a [`Definition`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DefinitionId(pub i64);

impl fmt::Display for DefinitionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

/// A persisted definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
  pub definition_id: DefinitionId,
  /// Canonical display text.
  pub value:         String,
  /// Explicit identity key. When present, it alone identifies the row.
  pub variant:       Option<String>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Input to [`LocaleStore::save_definition`](crate::store::LocaleStore::save_definition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDefinition {
  pub value:   String,
  pub variant: Option<String>,
}

impl NewDefinition {
  /// Build the row to insert for `(value, variant)`.
  ///
  /// An empty `value` with a variant stores the variant as the value so the
  /// definition never renders blank. An empty value without a variant is
  /// kept as-is.
  pub fn new(value: impl Into<String>, variant: Option<String>) -> Self {
    let value = value.into();
    let value = match &variant {
      Some(key) if value.is_empty() => key.clone(),
      _ => value,
    };
    Self { value, variant }
  }

  /// A definition identified by its text alone.
  pub fn text(value: impl Into<String>) -> Self { Self::new(value, None) }

  /// A definition identified by `variant`, falling back to it for display.
  pub fn keyed(value: impl Into<String>, variant: impl Into<String>) -> Self {
    Self::new(value, Some(variant.into()))
  }

  /// The lookup the store performs before inserting.
  pub fn identity(&self) -> Identity<'_> {
    match &self.variant {
      Some(key) => Identity::Variant(key),
      None => Identity::Value(&self.value),
    }
  }
}

/// How an incoming definition is matched against existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<'a> {
  /// Match on `variant` only; the incoming value is ignored.
  Variant(&'a str),
  /// Match on `value` among rows whose variant is NULL.
  Value(&'a str),
}

/// Outcome of a definition write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saved {
  pub id:       DefinitionId,
  /// `true` only when this call created the row.
  pub inserted: bool,
}
