//! Translations — locale-specific renderings of a [`Definition`].
//!
//! [`Definition`]: crate::definition::Definition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::definition::DefinitionId;

/// Row identifier of a [`Translation`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TranslationId(pub i64);

/// A persisted translation. At most one exists per `(definition_id, locale)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
  pub translation_id: TranslationId,
  pub locale:         String,
  pub definition_id:  DefinitionId,
  pub translation:    String,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Outcome of a translation write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationWrite {
  /// No row existed for the pair; one was created.
  Inserted,
  /// The existing row's text was overwritten.
  Updated,
}
