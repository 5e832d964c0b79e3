// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! How plots look.
//!
//! A [`PlotStyle`] is handed to every plotting function; there is no
//! process-wide plot state. Styles can be read from toml or json files, in
//! which any field may be left out to get its default.

use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

use super::StyleError;
use crate::{
    constants::{DEFAULT_SIZE_MAX, DEFAULT_SIZE_MIN},
    pipeline::SizeScale,
};

#[derive(Debug, Display, EnumIter, EnumString)]
pub(crate) enum StyleFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

/// Colour scales used to colour-code scatter points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[strum(serialize = "jet")]
    Jet,
    #[strum(serialize = "hot")]
    Hot,
    #[strum(serialize = "gray")]
    Gray,
}

impl Colormap {
    /// The colour at `frac` along the scale. `frac` is clamped to \[0, 1\];
    /// NaN maps to the start of the scale.
    pub fn rgb(self, frac: f64) -> (u8, u8, u8) {
        let x = if frac.is_nan() { 0.0 } else { frac.clamp(0.0, 1.0) };
        let (r, g, b) = match self {
            // Piecewise-linear, dark blue through cyan, yellow and dark red.
            Colormap::Jet => {
                let ramp = |centre: f64| (1.5 - (4.0 * x - centre).abs()).clamp(0.0, 1.0);
                (ramp(3.0), ramp(2.0), ramp(1.0))
            }
            Colormap::Hot => (
                (3.0 * x).clamp(0.0, 1.0),
                (3.0 * x - 1.0).clamp(0.0, 1.0),
                (3.0 * x - 2.0).clamp(0.0, 1.0),
            ),
            Colormap::Gray => (x, x, x),
        };
        let to_u8 = |v: f64| (v * 255.0).round() as u8;
        (to_u8(r), to_u8(g), to_u8(b))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotStyle {
    /// Image width \[pixels\].
    pub width: u32,
    /// Image height \[pixels\].
    pub height: u32,
    pub font: String,
    pub font_size: u32,
    /// Opacity of scatter points.
    pub alpha: f64,
    pub colormap: Colormap,
    /// Colour of guide lines and the shaded millisecond-pulsar region.
    pub guide_colour: [u8; 3],
    /// Colour of the millisecond-pulsar histogram.
    pub msp_colour: [u8; 3],
    /// Colour of the normal-pulsar histogram.
    pub normal_colour: [u8; 3],
    /// The smallest dot size (an area, in points squared).
    pub size_min: f64,
    /// The largest dot size (an area, in points squared).
    pub size_max: f64,
    /// Pixels of marker radius per point of marker diameter.
    pub marker_scale: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            width: 1100,
            height: 850,
            font: "sans-serif".to_string(),
            font_size: 26,
            alpha: 0.7,
            colormap: Colormap::Jet,
            guide_colour: [127, 127, 127],
            msp_colour: [255, 127, 14],
            normal_colour: [148, 103, 189],
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            marker_scale: 0.7,
        }
    }
}

impl PlotStyle {
    /// Read a style from a toml or json file; the type is determined by the
    /// file's extension.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<PlotStyle, StyleError> {
        let file = file.as_ref();
        debug!("Attempting to parse plot style file {}", file.display());

        let file_type = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| StyleFileType::from_str(&e).ok());
        let style: PlotStyle = match file_type {
            Some(StyleFileType::Toml) => {
                debug!("Parsing toml file...");
                let contents = std::fs::read_to_string(file)?;
                toml::from_str(&contents).map_err(|err| StyleError::Toml {
                    file: file.to_path_buf(),
                    err,
                })?
            }
            Some(StyleFileType::Json) => {
                debug!("Parsing json file...");
                let contents = std::fs::read_to_string(file)?;
                serde_json::from_str(&contents).map_err(|err| StyleError::Json {
                    file: file.to_path_buf(),
                    err,
                })?
            }
            None => return Err(StyleError::UnknownFileType(file.to_path_buf())),
        };
        style.validate()?;
        Ok(style)
    }

    /// Check values that can't be expressed by types alone.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.width == 0 || self.height == 0 {
            return Err(StyleError::Invalid(format!(
                "image dimensions must be positive (got {}x{})",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(StyleError::Invalid(format!(
                "alpha must be between 0 and 1 (got {})",
                self.alpha
            )));
        }
        if !self.marker_scale.is_finite() || self.marker_scale <= 0.0 {
            return Err(StyleError::Invalid(format!(
                "marker_scale must be positive (got {})",
                self.marker_scale
            )));
        }
        Ok(())
    }

    pub fn size_scale(&self) -> SizeScale {
        SizeScale {
            min: self.size_min,
            max: self.size_max,
        }
    }

    /// The radius \[pixels\] of a marker with the given size. Sizes are areas,
    /// so the radius goes as the square root; negative sizes give no marker.
    pub fn marker_radius(&self, size: f64) -> u32 {
        if size.is_nan() || size <= 0.0 {
            return 0;
        }
        (size.sqrt() * self.marker_scale).round() as u32
    }
}
