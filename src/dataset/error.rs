// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with reading a dataset file.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset line {line_num}: Couldn't parse '{string}' as a float")]
    ParseFloat { line_num: u32, string: String },

    #[error("Dataset line {line_num}: Expected at least {expected} columns, but found {found}")]
    TooFewColumns {
        line_num: u32,
        expected: usize,
        found: usize,
    },

    #[error("The dataset contains no data rows")]
    NoRows,

    #[error("No dataset columns were requested")]
    NoColumns,

    #[error("Expected {expected} dataset columns, but read {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
