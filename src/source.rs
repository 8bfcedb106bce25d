//! Record sources for the aggregation pipeline.
//!
//! A source is any iterator of `Result<R>` where `R: Record`. [`CsvSource`]
//! streams rows from a header-driven CSV file; plain `HashMap`/`BTreeMap`
//! records cover in-memory callers.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::hash::BuildHasher;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{ComplaintError, Result};

/// Read-only, by-name view of one input row.
pub trait Record {
    /// Returns the value stored under `name`, if the row has one.
    fn field(&self, name: &str) -> Option<&str>;

    /// 1-based input line of the row, when the source tracks it.
    fn line(&self) -> Option<u64> {
        None
    }

    /// Returns the value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ComplaintError::Schema`] when the field is absent.
    fn get_required_field(&self, name: &str) -> Result<&str> {
        self.field(name).ok_or_else(|| ComplaintError::Schema {
            field: name.to_string(),
            line: self.line(),
        })
    }
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// One CSV row together with the header lookup of its file.
#[derive(Debug, Clone)]
pub struct CsvRecord {
    columns: Rc<HashMap<String, usize>>,
    values: StringRecord,
}

impl Record for CsvRecord {
    fn field(&self, name: &str) -> Option<&str> {
        let index = *self.columns.get(name)?;
        self.values.get(index)
    }

    fn line(&self) -> Option<u64> {
        self.values.position().map(|pos| pos.line())
    }
}

/// Lazy, single-pass reader over a header-driven CSV input.
///
/// Rows may be shorter than the header; a field past the end of a short row
/// is reported as missing when requested. The iterator stops after the
/// first error.
pub struct CsvSource<R = File> {
    path: PathBuf,
    reader: csv::Reader<R>,
    columns: Option<Rc<HashMap<String, usize>>>,
    finished: bool,
}

impl CsvSource<File> {
    /// Opens the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ComplaintError::Source`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = Self::builder()
            .from_path(&path)
            .map_err(|source| ComplaintError::Source {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "Opened record source");

        Ok(Self::with_reader(path, reader))
    }
}

impl<R: io::Read> CsvSource<R> {
    /// Wraps an already-open reader. `label` names the input in errors.
    pub fn from_reader(reader: R, label: impl Into<PathBuf>) -> Self {
        Self::with_reader(label.into(), Self::builder().from_reader(reader))
    }

    fn builder() -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(true).flexible(true);
        builder
    }

    fn with_reader(path: PathBuf, reader: csv::Reader<R>) -> Self {
        Self {
            path,
            reader,
            columns: None,
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn columns(&mut self) -> Result<Rc<HashMap<String, usize>>> {
        if let Some(columns) = &self.columns {
            return Ok(Rc::clone(columns));
        }

        let headers = self
            .reader
            .headers()
            .map_err(|source| ComplaintError::Source {
                path: self.path.clone(),
                source,
            })?;

        // Later duplicates overwrite earlier ones.
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();
        debug!(columns = columns.len(), "Read header row");

        let columns = Rc::new(columns);
        self.columns = Some(Rc::clone(&columns));
        Ok(columns)
    }
}

impl<R: io::Read> Iterator for CsvSource<R> {
    type Item = Result<CsvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let columns = match self.columns() {
            Ok(columns) => columns,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        let mut values = StringRecord::new();
        match self.reader.read_record(&mut values) {
            Ok(true) => Some(Ok(CsvRecord { columns, values })),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(source) => {
                self.finished = true;
                Some(Err(ComplaintError::Source {
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}
