//! Directory reader: selects locale files and loads their entries.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{
  Error, Result,
  format::{Entries, MappingFormat},
};

/// One loaded locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
  pub path:    PathBuf,
  /// File name minus its extension, e.g. `fr` for `fr.lang`.
  pub locale:  String,
  pub entries: Entries,
}

/// Derive the locale of a file from its name: everything before the last
/// `.`. Returns `None` when that leaves nothing.
pub fn locale_from_file_name(name: &str) -> Option<&str> {
  let stem = Path::new(name).file_stem()?.to_str()?;
  (!stem.is_empty()).then_some(stem)
}

/// Reads every locale file of a directory.
///
/// Skipped entries: hidden files, subdirectories (including the front-end
/// override directory, whose files are merged separately), and any file
/// whose name contains the reserved legacy-export pattern.
#[derive(Debug, Clone)]
pub struct DirectoryReader<F> {
  format:           F,
  override_dir:     String,
  reserved_pattern: String,
}

impl<F: MappingFormat> DirectoryReader<F> {
  pub fn new(format: F) -> Self {
    Self {
      format,
      override_dir: "front".to_owned(),
      reserved_pattern: "program".to_owned(),
    }
  }

  pub fn with_override_dir(mut self, name: impl Into<String>) -> Self {
    self.override_dir = name.into();
    self
  }

  pub fn with_reserved_pattern(mut self, pattern: impl Into<String>) -> Self {
    self.reserved_pattern = pattern.into();
    self
  }

  /// Paths of the files in `dir` to migrate, in lexical order.
  pub fn select(&self, dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| Error::Io { path: dir.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
      let entry = entry.map_err(io_err)?;
      let name = entry.file_name();
      let name = name.to_string_lossy();

      if name.starts_with('.') {
        continue;
      }
      if name == self.override_dir.as_str() {
        tracing::debug!(dir = %dir.display(), "skipping override directory {name}");
        continue;
      }
      if !self.reserved_pattern.is_empty() && name.contains(self.reserved_pattern.as_str()) {
        tracing::debug!(dir = %dir.display(), "skipping reserved export {name}");
        continue;
      }
      if !entry.file_type().map_err(io_err)?.is_file() {
        tracing::debug!(dir = %dir.display(), "skipping non-file entry {name}");
        continue;
      }
      paths.push(entry.path());
    }

    paths.sort();
    Ok(paths)
  }

  /// Load a single locale file.
  pub fn load(&self, path: &Path) -> Result<LocaleFile> {
    let locale = path
      .file_name()
      .and_then(|n| n.to_str())
      .and_then(locale_from_file_name)
      .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))?
      .to_owned();

    let text = fs::read_to_string(path)
      .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let entries = self
      .format
      .parse(&text)
      .map_err(|source| Error::Parse { path: path.to_path_buf(), source })?;

    Ok(LocaleFile { path: path.to_path_buf(), locale, entries })
  }

  /// Select and load every locale file of `dir`.
  pub fn read(&self, dir: &Path) -> Result<Vec<LocaleFile>> {
    self.select(dir)?.iter().map(|p| self.load(p)).collect()
  }
}
