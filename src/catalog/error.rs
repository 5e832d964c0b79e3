// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from querying a pulsar catalogue.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("The catalogue response didn't contain a table")]
    NoTable,

    #[error("The catalogue table has no '{0}' column")]
    MissingColumn(String),

    #[error("Catalogue table line {line_num}: Expected {expected} values, but found {found}")]
    MalformedRow {
        line_num: usize,
        expected: usize,
        found: usize,
    },

    #[error("Tried to add a row with {found} values to a catalogue table with {expected} columns")]
    RowLength { expected: usize, found: usize },

    #[error("The catalogue service responded with HTTP status {0}")]
    Status(u16),

    #[error("Error when talking to the catalogue service: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors from turning a catalogue query into a dataset file.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Catalogue row {row}: Couldn't parse {column} value '{value}' as a float")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Couldn't write the dataset to {path}: {err}")]
    Write {
        path: PathBuf,
        err: std::io::Error,
    },
}
