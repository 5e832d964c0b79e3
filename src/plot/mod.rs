// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drawing the pulsar plots.
//!
//! Each `plot_*` function reads the dataset file fresh, runs the relevant
//! pipeline chain and writes one image. If the dataset can't be loaded, the
//! reason is logged, `Ok(None)` is returned and no image file is created.
//!
//! Drawing is an optional feature ("plotting"). Without it, everything up to
//! the drawing itself still runs, but [`PlotError::NoPlottingFeature`] is
//! returned instead of writing an image.

mod error;
#[cfg(feature = "plotting")]
mod render;
mod style;
#[cfg(test)]
mod tests;

pub use error::{PlotError, StyleError};
pub use style::{Colormap, PlotStyle};

use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, info, warn};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    pipeline::{AgeMap, GuideCurves, NearbyEnergy, PpdotDiagram},
    Dataset,
};
#[cfg(feature = "plotting")]
use render::{draw_distance, draw_nearby, draw_ppdot};
use style::StyleFileType;

lazy_static::lazy_static! {
    pub(crate) static ref IMAGE_EXTENSIONS_COMMA_SEPARATED: String = ImageFormat::iter().join(", ");

    pub(crate) static ref STYLE_FILE_TYPES_COMMA_SEPARATED: String = StyleFileType::iter().join(", ");
}

/// The image formats plots can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum ImageFormat {
    #[strum(serialize = "png")]
    Png,
    #[strum(serialize = "svg")]
    Svg,
}

impl ImageFormat {
    /// Determine the format from a file's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat, PlotError> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ImageFormat::from_str(&e).ok())
            .ok_or_else(|| PlotError::UnknownImageFormat(path.to_path_buf()))
    }
}

/// Format a total like "1.1 × 10^37" for annotating plots.
pub fn format_total(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value / 10_f64.powi(exponent);
    // Rounding to one decimal place can carry into the next power of 10.
    if (mantissa.abs() * 10.0).round() >= 100.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    format!("{mantissa:.1} × 10^{exponent}")
}

/// Warn about pulsars left off a plot because they have no age.
fn warn_non_positive_pdot(dataset: &Dataset, plot: &str) {
    let num = dataset.num_non_positive_pdot();
    if num > 0 {
        warn!("{num} pulsars have a non-positive period derivative and are left off the {plot}");
    }
}

/// Draw the P-Pdot diagram of every pulsar in the dataset.
pub fn plot_ppdot<P: AsRef<Path>, Q: AsRef<Path>>(
    dataset_file: P,
    output: Q,
    style: &PlotStyle,
) -> Result<Option<PpdotDiagram>, PlotError> {
    let output = output.as_ref();
    let format = ImageFormat::from_path(output)?;
    let dataset = match Dataset::load(dataset_file) {
        Some(d) => d,
        None => return Ok(None),
    };
    debug!("{}", dataset.summary());

    let diagram = PpdotDiagram::new(&dataset, &style.size_scale())?;
    let guides = GuideCurves::new();
    draw_ppdot(output, format, style, &diagram, &guides)?;
    info!("Wrote {}", output.display());
    Ok(Some(diagram))
}

/// Draw the candidate millisecond pulsars in the Galactic plane, coloured by
/// age.
pub fn plot_distance<P: AsRef<Path>, Q: AsRef<Path>>(
    dataset_file: P,
    output: Q,
    style: &PlotStyle,
) -> Result<Option<AgeMap>, PlotError> {
    let output = output.as_ref();
    let format = ImageFormat::from_path(output)?;
    let dataset = match Dataset::load(dataset_file) {
        Some(d) => d,
        None => return Ok(None),
    };
    debug!("{}", dataset.summary());
    warn_non_positive_pdot(&dataset, "distance plot");

    let map = AgeMap::new(&dataset, &style.size_scale())?;
    if let Some((lo, hi)) = map.log_age_range() {
        info!("Age (log10) range: {lo}, {hi}");
    }
    draw_distance(output, format, style, &map)?;
    info!("Wrote {}", output.display());
    Ok(Some(map))
}

/// Draw histograms of the spin-down energy flux of nearby, old pulsars.
pub fn plot_nearby<P: AsRef<Path>, Q: AsRef<Path>>(
    dataset_file: P,
    output: Q,
    style: &PlotStyle,
) -> Result<Option<NearbyEnergy>, PlotError> {
    let output = output.as_ref();
    let format = ImageFormat::from_path(output)?;
    let dataset = match Dataset::load(dataset_file) {
        Some(d) => d,
        None => return Ok(None),
    };
    debug!("{}", dataset.summary());
    warn_non_positive_pdot(&dataset, "nearby histogram");

    let nearby = NearbyEnergy::new(&dataset);
    info!("msp (millisecond pulsars) : {:e}", nearby.msp_total);
    info!("normal pulsars : {:e}", nearby.normal_total);
    draw_nearby(output, format, style, &nearby)?;
    info!("Wrote {}", output.display());
    Ok(Some(nearby))
}

#[cfg(not(feature = "plotting"))]
fn draw_ppdot(
    _: &Path,
    _: ImageFormat,
    _: &PlotStyle,
    _: &PpdotDiagram,
    _: &GuideCurves,
) -> Result<(), PlotError> {
    Err(PlotError::NoPlottingFeature)
}

#[cfg(not(feature = "plotting"))]
fn draw_distance(_: &Path, _: ImageFormat, _: &PlotStyle, _: &AgeMap) -> Result<(), PlotError> {
    Err(PlotError::NoPlottingFeature)
}

#[cfg(not(feature = "plotting"))]
fn draw_nearby(
    _: &Path,
    _: ImageFormat,
    _: &PlotStyle,
    _: &NearbyEnergy,
) -> Result<(), PlotError> {
    Err(PlotError::NoPlottingFeature)
}
