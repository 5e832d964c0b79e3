// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing the pulsar dataset file.
//!
//! The file is plain text: one `#` comment line, then one whitespace-separated
//! row per pulsar with the columns P0, P1, EDOT, XX and YY.
//!
//! ```text
//! # P0 - P1 - EDOT - XX - YY
//! 1.15636e-01 5.96520e-15 1.52900e+35 -4.650e+00  6.480e-01
//! ```

mod error;

pub use error::DatasetError;

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, error, trace};
use ndarray::prelude::*;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The first line of every dataset file.
pub const DATASET_HEADER: &str = "# P0 - P1 - EDOT - XX - YY";

/// The columns of a dataset file, in file order. The names match the ATNF
/// catalogue parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Column {
    #[strum(serialize = "P0")]
    P0,
    #[strum(serialize = "P1")]
    P1,
    #[strum(serialize = "EDOT")]
    Edot,
    #[strum(serialize = "XX")]
    Xx,
    #[strum(serialize = "YY")]
    Yy,
}

impl Column {
    /// The zero-based position of this column in a dataset row.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single pulsar, as stored in the dataset file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulsarRecord {
    /// Rotation period \[s\].
    pub p0: f64,
    /// Period derivative \[s/s\].
    pub p1: f64,
    /// Spin-down luminosity \[erg/s\].
    pub edot: f64,
    /// Galactic-plane X coordinate \[kpc\].
    pub xx: f64,
    /// Galactic-plane Y coordinate \[kpc\].
    pub yy: f64,
}

impl PulsarRecord {
    /// Write this record as one dataset line. Periods, period derivatives and
    /// luminosities keep 5 decimal places, coordinates 3.
    pub fn write<T: Write>(&self, buf: &mut T) -> std::io::Result<()> {
        writeln!(
            buf,
            "{} {} {} {} {}",
            format_sci(self.p0, 5, 10),
            format_sci(self.p1, 5, 10),
            format_sci(self.edot, 5, 10),
            format_sci(self.xx, 3, 10),
            format_sci(self.yy, 3, 10),
        )
    }
}

/// All of the pulsars in a dataset file as parallel arrays. Every array has the
/// same length, and index `i` of each array belongs to the same pulsar.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub p0: Array1<f64>,
    pub p1: Array1<f64>,
    pub edot: Array1<f64>,
    pub xx: Array1<f64>,
    pub yy: Array1<f64>,
}

impl Dataset {
    /// Read a dataset file. If it can't be read, the reason is logged and
    /// `None` is returned; callers must not produce any output in that case.
    pub fn load<P: AsRef<Path>>(path: P) -> Option<Dataset> {
        let path = path.as_ref();
        match Dataset::read(path) {
            Ok(d) => {
                debug!("Loaded {} pulsars from {}", d.len(), path.display());
                Some(d)
            }
            Err(e) => {
                error!("Error loading data from {}: {e}", path.display());
                None
            }
        }
    }

    /// Read a dataset file, returning the reason for any failure.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
        let columns = Column::iter().map(Column::index).collect::<Vec<_>>();
        match <[Array1<f64>; 5]>::try_from(read_columns(path, &columns)?) {
            Ok([p0, p1, edot, xx, yy]) => Ok(Dataset {
                p0,
                p1,
                edot,
                xx,
                yy,
            }),
            Err(arrays) => Err(DatasetError::ColumnCount {
                expected: columns.len(),
                found: arrays.len(),
            }),
        }
    }

    pub fn from_records(records: &[PulsarRecord]) -> Dataset {
        Dataset {
            p0: records.iter().map(|r| r.p0).collect(),
            p1: records.iter().map(|r| r.p1).collect(),
            edot: records.iter().map(|r| r.edot).collect(),
            xx: records.iter().map(|r| r.xx).collect(),
            yy: records.iter().map(|r| r.yy).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.p0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p0.is_empty()
    }

    /// Iterate over the pulsars as rows.
    pub fn records(&self) -> impl Iterator<Item = PulsarRecord> + '_ {
        (0..self.len()).map(|i| PulsarRecord {
            p0: self.p0[i],
            p1: self.p1[i],
            edot: self.edot[i],
            xx: self.xx[i],
            yy: self.yy[i],
        })
    }

    /// Keep only the pulsars whose mask element is `true`.
    ///
    /// # Panics
    ///
    /// Panics if the mask length differs from the dataset length.
    pub fn select(&self, mask: ArrayView1<bool>) -> Dataset {
        assert_eq!(mask.len(), self.len(), "mask length must match the dataset");
        let pick = |a: &Array1<f64>| -> Array1<f64> {
            a.iter()
                .zip(mask.iter())
                .filter(|(_, &m)| m)
                .map(|(&v, _)| v)
                .collect()
        };
        Dataset {
            p0: pick(&self.p0),
            p1: pick(&self.p1),
            edot: pick(&self.edot),
            xx: pick(&self.xx),
            yy: pick(&self.yy),
        }
    }

    /// The number of pulsars whose period derivative isn't positive. These
    /// have no meaningful age or field strength.
    pub fn num_non_positive_pdot(&self) -> usize {
        self.p1.iter().filter(|&&p1| p1 <= 0.0 || p1.is_nan()).count()
    }

    /// A one-line description of the dataset for logging.
    pub fn summary(&self) -> String {
        let range = |a: &Array1<f64>| {
            a.iter()
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        };
        let (p0_min, p0_max) = range(&self.p0);
        let (p1_min, p1_max) = range(&self.p1);
        format!(
            "{} pulsars; P0 in [{p0_min:e}, {p0_max:e}] s, P1 in [{p1_min:e}, {p1_max:e}]",
            self.len()
        )
    }
}

/// Read the requested (zero-based) columns out of a dataset file. One array is
/// returned per requested column, in the order requested, and all arrays have
/// the same length.
pub fn read_columns<P: AsRef<Path>>(
    path: P,
    columns: &[usize],
) -> Result<Vec<Array1<f64>>, DatasetError> {
    let path = path.as_ref();
    trace!("Reading columns {columns:?} from {}", path.display());
    let mut buf = BufReader::new(File::open(path)?);
    parse_columns(&mut buf, columns)
}

/// Like [`read_columns`], but any failure is logged and `None` is returned.
pub fn load_columns<P: AsRef<Path>>(path: P, columns: &[usize]) -> Option<Vec<Array1<f64>>> {
    let path = path.as_ref();
    match read_columns(path, columns) {
        Ok(c) => Some(c),
        Err(e) => {
            error!("Error loading data from {}: {e}", path.display());
            None
        }
    }
}

/// Parse a buffer containing a dataset into the requested columns.
pub fn parse_columns<T: BufRead>(
    buf: &mut T,
    columns: &[usize],
) -> Result<Vec<Array1<f64>>, DatasetError> {
    let max_column = *columns.iter().max().ok_or(DatasetError::NoColumns)?;

    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut values: Vec<Vec<f64>> = vec![vec![]; columns.len()];
    while buf.read_line(&mut line)? > 0 {
        line_num += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            line.clear();
            continue;
        }

        let items: Vec<&str> = trimmed.split_ascii_whitespace().collect();
        if items.len() <= max_column {
            return Err(DatasetError::TooFewColumns {
                line_num,
                expected: max_column + 1,
                found: items.len(),
            });
        }
        for (&column, values) in columns.iter().zip(values.iter_mut()) {
            let string = items[column];
            let value = string.parse().map_err(|_| DatasetError::ParseFloat {
                line_num,
                string: string.to_string(),
            })?;
            values.push(value);
        }

        line.clear();
    }

    if values.first().map(|v| v.is_empty()).unwrap_or(true) {
        return Err(DatasetError::NoRows);
    }
    Ok(values.into_iter().map(Array1::from_vec).collect())
}

/// Write a complete dataset (header and rows). Returns the number of rows
/// written.
pub fn write_dataset<'a, T, I>(buf: &mut T, records: I) -> std::io::Result<usize>
where
    T: Write,
    I: IntoIterator<Item = &'a PulsarRecord>,
{
    writeln!(buf, "{DATASET_HEADER}")?;
    let mut count = 0;
    for r in records {
        r.write(buf)?;
        count += 1;
    }
    Ok(count)
}

/// Format a float in scientific notation the way C's `%W.Pe` does: `precision`
/// decimal places, an exponent with a sign and at least two digits, right
/// aligned to `width` characters.
pub(crate) fn format_sci(value: f64, precision: usize, width: usize) -> String {
    let s = if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        let rust = format!("{value:.precision$e}");
        match rust.split_once('e') {
            Some((mantissa, exponent)) => {
                // Rust's exponents never fail to parse; they look like "-1" or "12".
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => rust,
        }
    };
    format!("{s:>width$}")
}
