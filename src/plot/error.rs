// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::{IMAGE_EXTENSIONS_COMMA_SEPARATED, STYLE_FILE_TYPES_COMMA_SEPARATED};
use crate::pipeline::PipelineError;

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("psrplot was not compiled with the \"plotting\" feature.\nYou need to compile psrplot with this feature to draw plots")]
    NoPlottingFeature,

    #[error(
        "Can't write a plot to {0}: unknown image format.\nSupported formats: {}",
        *IMAGE_EXTENSIONS_COMMA_SEPARATED
    )]
    UnknownImageFormat(PathBuf),

    #[error("Error from the plotters library while drawing {plot}: {err}")]
    Draw { plot: &'static str, err: String },

    #[error("Couldn't write plot {file}: {err}")]
    Write { file: PathBuf, err: std::io::Error },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Error, Debug)]
pub enum StyleError {
    #[error(
        "Plot style file {0} has an unknown type.\nSupported types: {}",
        *STYLE_FILE_TYPES_COMMA_SEPARATED
    )]
    UnknownFileType(PathBuf),

    #[error("Couldn't parse toml plot style file {file}: {err}")]
    Toml { file: PathBuf, err: toml::de::Error },

    #[error("Couldn't parse json plot style file {file}: {err}")]
    Json {
        file: PathBuf,
        err: serde_json::Error,
    },

    #[error("Invalid plot style: {0}")]
    Invalid(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
