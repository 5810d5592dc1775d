//! CSV sample reader
//!
//! Reads the header row and the first `sample_rows` data rows of a CSV file.
//! Nothing past the sample is parsed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ::csv::ReaderBuilder;
use tracing::{debug, info};

use super::error::{ImportError, ImportResult};
use crate::inference::ColumnSample;

const UTF8_BOM: char = '\u{feff}';

/// Options for reading a CSV sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter (single byte)
    pub delimiter: u8,
    /// Number of data rows to sample
    pub sample_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sample_rows: 1,
        }
    }
}

impl CsvOptions {
    /// Set the delimiter from a character, rejecting anything wider than one byte
    pub fn with_delimiter(mut self, delimiter: char) -> ImportResult<Self> {
        if !delimiter.is_ascii() {
            return Err(ImportError::InvalidDelimiter(delimiter));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Set the number of data rows to sample
    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }
}

/// Header row and sampled data rows of one CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSample {
    source: Option<PathBuf>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvSample {
    /// Read a sample from a file on disk
    pub fn from_path(path: impl AsRef<Path>, options: &CsvOptions) -> ImportResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ImportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sample = Self::from_reader(file, options)?;
        sample.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            columns = sample.headers.len(),
            rows = sample.rows.len(),
            "Read CSV sample"
        );
        Ok(sample)
    }

    /// Read a sample from any reader
    pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> ImportResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
                h.trim().to_string()
            })
            .collect();

        if headers.is_empty() {
            return Err(ImportError::NoHeader);
        }
        if let Some(position) = headers.iter().position(String::is_empty) {
            return Err(ImportError::EmptyHeader {
                position: position + 1,
            });
        }

        let mut rows = Vec::with_capacity(options.sample_rows);
        for record in reader.records().take(options.sample_rows) {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() != headers.len() {
                debug!(
                    expected = headers.len(),
                    found = row.len(),
                    "Row width differs from header, padding or truncating"
                );
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }

        Ok(Self {
            source: None,
            headers,
            rows,
        })
    }

    /// Trimmed header names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Sampled data rows, each exactly as wide as the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Path the sample was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// File name without extension, used to name generated tables and schemas
    pub fn file_stem(&self) -> Option<&str> {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
    }

    /// One [`ColumnSample`] per header, in file order
    pub fn columns(&self) -> Vec<ColumnSample> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                ColumnSample::new(name.as_str(), self.rows.iter().map(|row| row[i].as_str()))
            })
            .collect()
    }
}
