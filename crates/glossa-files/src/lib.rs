//! File sources for glossa: per-locale mapping files on disk.
//!
//! A source directory holds one file per locale, named `<locale>.<ext>`,
//! each a flat key → text mapping. [`DirectoryReader`] selects the files,
//! derives their locale and parses them with a [`MappingFormat`].

pub mod error;
pub mod format;
pub mod reader;

pub use error::{Error, ParseError, Result};
pub use format::{Entries, FileFormat, MappingFormat};
pub use reader::{DirectoryReader, LocaleFile, locale_from_file_name};
