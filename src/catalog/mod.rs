// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting pulsar parameters out of a catalogue and into a dataset file.
//!
//! A [`CatalogSource`] answers a query for a list of parameter names with a
//! [`CatalogTable`]. Missing values are represented with `None` from the moment
//! a table is built; the catalogue's own missing-value marker
//! ([`MISSING_VALUE`]) never travels any further.

mod atnf;
mod error;

pub use atnf::{
    parse_response, AtnfWebCatalog, CatalogFileSource, ATNF_QUERY_URL, DEFAULT_TIMEOUT,
};
pub use error::{CatalogError, FetchError};

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use strum::IntoEnumIterator;

use crate::dataset::{write_dataset, Column, PulsarRecord};

/// The catalogue's marker for a value that isn't known.
pub const MISSING_VALUE: &str = "--";

/// The parameters requested from the catalogue. Only those named by
/// [`Column`] are written to the dataset.
pub const CATALOG_PARAMS: [&str; 10] = [
    "P0", "P1", "EDOT", "XX", "YY", "DIST", "ASSOC", "BINARY", "TYPE", "P1_I",
];

/// Something that can answer a catalogue query.
pub trait CatalogSource {
    /// Get a table with (at least) one column per requested parameter.
    fn query(&self, params: &[&str]) -> Result<CatalogTable, CatalogError>;
}

/// Convert a raw catalogue cell into an optional value.
pub fn parse_cell(cell: &str) -> Option<String> {
    let cell = cell.trim();
    if cell.is_empty() || cell == MISSING_VALUE {
        None
    } else {
        Some(cell.to_string())
    }
}

/// A table of catalogue values. Every row has exactly one (possibly missing)
/// value per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl CatalogTable {
    pub fn new(columns: Vec<String>) -> CatalogTable {
        CatalogTable {
            columns,
            rows: vec![],
        }
    }

    /// Add a row of raw cells; missing-value markers become `None`.
    pub fn push_raw_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<(), CatalogError> {
        self.push_row(cells.iter().map(|c| parse_cell(c.as_ref())).collect())
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<(), CatalogError> {
        if row.len() != self.columns.len() {
            return Err(CatalogError::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The position of a column, ignoring case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Every row whose dataset columns are all present, as [`PulsarRecord`]s.
    /// Rows with any missing dataset value are skipped. A present value that
    /// isn't a number is an error.
    pub fn pulsar_records(&self) -> Result<Vec<PulsarRecord>, FetchError> {
        let mut indices = [0; 5];
        for (index, column) in indices.iter_mut().zip(Column::iter()) {
            let name = column.to_string();
            *index = self
                .column_index(&name)
                .ok_or(CatalogError::MissingColumn(name))?;
        }

        let mut records = vec![];
        'rows: for (i_row, row) in self.rows.iter().enumerate() {
            let mut values = [0.0; 5];
            let cells = values.iter_mut().zip(indices.iter()).zip(Column::iter());
            for ((value, &index), column) in cells {
                let cell = match row[index].as_deref() {
                    Some(c) => c,
                    None => {
                        debug!("Skipping catalogue row {i_row}; {column} is missing");
                        continue 'rows;
                    }
                };
                *value = cell.parse().map_err(|_| FetchError::InvalidValue {
                    row: i_row,
                    column: column.to_string(),
                    value: cell.to_string(),
                })?;
            }
            let [p0, p1, edot, xx, yy] = values;
            records.push(PulsarRecord {
                p0,
                p1,
                edot,
                xx,
                yy,
            });
        }

        Ok(records)
    }
}

/// Query `source` and write every complete row to the dataset file `output`.
/// Returns the number of pulsars written. On any failure, the problem is
/// logged, 0 is returned and any existing dataset file is left untouched.
pub fn fetch_catalog<S, P>(source: &S, output: P) -> usize
where
    S: CatalogSource + ?Sized,
    P: AsRef<Path>,
{
    match try_fetch_catalog(source, output) {
        Ok(count) => count,
        Err(e) => {
            error!("An error occurred: {e}");
            0
        }
    }
}

/// Like [`fetch_catalog`], but failures are returned to the caller.
pub fn try_fetch_catalog<S, P>(source: &S, output: P) -> Result<usize, FetchError>
where
    S: CatalogSource + ?Sized,
    P: AsRef<Path>,
{
    let output = output.as_ref();

    info!("Querying the pulsar catalogue...");
    let table = source.query(&CATALOG_PARAMS)?;
    info!("Query successful! Got {} rows", table.num_rows());

    let records = table.pulsar_records()?;
    let count = write_atomically(output, &records).map_err(|err| FetchError::Write {
        path: output.to_path_buf(),
        err,
    })?;
    info!("Successfully saved {count} objects to {}", output.display());
    Ok(count)
}

/// Write the records to a temporary file next to `output`, then move it over
/// `output`. A failure part way through leaves `output` as it was.
fn write_atomically(output: &Path, records: &[PulsarRecord]) -> std::io::Result<usize> {
    let tmp_path = {
        let mut s = OsString::from(output.as_os_str());
        s.push(".tmp");
        PathBuf::from(s)
    };

    match write_dataset_file(&tmp_path, records) {
        Ok(count) => {
            std::fs::rename(&tmp_path, output)?;
            Ok(count)
        }
        Err(e) => {
            // Clean up partial files on error.
            let _ = std::fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn write_dataset_file(path: &Path, records: &[PulsarRecord]) -> std::io::Result<usize> {
    let mut buf = BufWriter::new(File::create(path)?);
    let count = write_dataset(&mut buf, records)?;
    buf.flush()?;
    Ok(count)
}
