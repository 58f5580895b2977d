//! Runtime configuration, deserialised from `glossa.toml` and `GLOSSA_*`
//! environment variables.

use std::path::{Path, PathBuf};

use glossa_files::{DirectoryReader, FileFormat};
use serde::Deserialize;

/// How the English locale file identifies its definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnglishIdentity {
  /// English text is the value, the file key the variant. Non-English files
  /// key their definitions the same way, so either processing order lands
  /// on one definition per key.
  #[default]
  Key,
  /// English text alone identifies the definition. Non-English files then
  /// create separate key-identified definitions.
  Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
  /// SQLite file of the target locale store.
  pub target_path:         PathBuf,
  /// SQLite file of the legacy database read by the database path.
  pub source_path:         PathBuf,
  pub english_locale:      String,
  /// `lms_language` id of English in the legacy database.
  pub english_language_id: i64,
  pub english_identity:    EnglishIdentity,
  pub file_format:         FileFormat,
  /// Language directories, relative to the base directory given on the
  /// command line. Processed in order.
  pub language_dirs:       Vec<PathBuf>,
  pub override_dir:        String,
  pub reserved_pattern:    String,
}

impl Default for MigrateConfig {
  fn default() -> Self {
    Self {
      target_path:         PathBuf::from("locale.sqlite3"),
      source_path:         PathBuf::from("legacy.sqlite3"),
      english_locale:      "en".to_owned(),
      english_language_id: 1,
      english_identity:    EnglishIdentity::Key,
      file_format:         FileFormat::Json,
      // The customer front-end set already merges the base front-end files.
      language_dirs:       vec![
        PathBuf::from("app/application/language"),
        PathBuf::from("app/customer/application/language/front"),
      ],
      override_dir:        "front".to_owned(),
      reserved_pattern:    "program".to_owned(),
    }
  }
}

impl MigrateConfig {
  /// Layer the optional TOML file at `path` and `GLOSSA_*` variables over
  /// the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("GLOSSA"))
      .build()?
      .try_deserialize()
  }

  pub fn directory_reader(&self) -> DirectoryReader<FileFormat> {
    DirectoryReader::new(self.file_format)
      .with_override_dir(&self.override_dir)
      .with_reserved_pattern(&self.reserved_pattern)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
