//! The relational source the database migration path reads from.
//!
//! Implementations are read-only. They return candidate rows and leave the
//! exactly-one policy to [`crate::resolve`].

use std::future::Future;

use serde::{Deserialize, Serialize};

/// A `program` or `program_tier` row. Single-language canonical text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRow {
  pub name:        Option<String>,
  pub description: Option<String>,
}

/// An event detail row: one language's title and description for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetailRow {
  pub event_id:    i64,
  pub language_id: i64,
  pub title:       Option<String>,
  pub description: Option<String>,
}

/// The two translatable fields of an event detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventField {
  Title,
  Description,
}

impl EventField {
  pub const ALL: [EventField; 2] = [EventField::Title, EventField::Description];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Title => "title",
      Self::Description => "description",
    }
  }
}

impl EventDetailRow {
  pub fn field(&self, field: EventField) -> Option<&str> {
    match field {
      EventField::Title => self.title.as_deref(),
      EventField::Description => self.description.as_deref(),
    }
  }
}

/// A `lms_language` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRow {
  pub language_id: i64,
  pub acronym:     String,
}

/// Read access to the legacy relational database.
pub trait LegacySource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every `program` row.
  fn programs(
    &self,
  ) -> impl Future<Output = Result<Vec<ProgramRow>, Self::Error>> + Send + '_;

  /// Every `program_tier` row.
  fn program_tiers(
    &self,
  ) -> impl Future<Output = Result<Vec<ProgramRow>, Self::Error>> + Send + '_;

  /// Event details of every event not flagged as legacy.
  fn event_details(
    &self,
  ) -> impl Future<Output = Result<Vec<EventDetailRow>, Self::Error>> + Send + '_;

  /// All detail rows of `event_id` written in `language_id`.
  fn event_details_in(
    &self,
    event_id: i64,
    language_id: i64,
  ) -> impl Future<Output = Result<Vec<EventDetailRow>, Self::Error>> + Send + '_;

  /// All language rows carrying `language_id`.
  fn languages(
    &self,
    language_id: i64,
  ) -> impl Future<Output = Result<Vec<LanguageRow>, Self::Error>> + Send + '_;
}
