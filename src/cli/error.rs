// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all psrplot-related errors. This should be the *only* error
//! enum that is publicly visible from the command line.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    catalog::{CatalogError, FetchError},
    plot::{PlotError, StyleError},
};

const URL: &str = "https://www.atnf.csiro.au/research/pulsar/psrcat";

/// The *only* publicly visible error from psrplot. Each error message should
/// include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum PsrplotError {
    /// An error related to querying the catalogue.
    #[error("{0}\n\nSee for more info: {URL}/psrcat_help.html")]
    Query(String),

    /// The dataset file couldn't be read, so nothing was plotted.
    #[error("Couldn't load the pulsar dataset {0}; no plot was made.\n\nRun `psrplot query` to create it, or supply another file with --dataset")]
    NoData(PathBuf),

    /// None of the plots requested could be made.
    #[error("None of the {0} plots could be made")]
    NothingPlotted(usize),

    /// An error related to drawing plots.
    #[error("{0}")]
    Plot(String),

    /// An error related to plot style files.
    #[error("{0}\n\nStyle files are toml or json; any setting left out keeps its default")]
    Style(String),

    /// A generic error that can't be clarified further with documentation,
    /// e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<FetchError> for PsrplotError {
    fn from(e: FetchError) -> Self {
        let s = e.to_string();
        match e {
            FetchError::Catalog(CatalogError::IO(_)) | FetchError::Write { .. } => {
                Self::Generic(s)
            }
            FetchError::Catalog(_) | FetchError::InvalidValue { .. } => Self::Query(s),
        }
    }
}

impl From<PlotError> for PsrplotError {
    fn from(e: PlotError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<StyleError> for PsrplotError {
    fn from(e: StyleError) -> Self {
        let s = e.to_string();
        match e {
            StyleError::IO(_) => Self::Generic(s),
            _ => Self::Style(s),
        }
    }
}

impl From<std::io::Error> for PsrplotError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
