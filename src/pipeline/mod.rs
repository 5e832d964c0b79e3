// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Derived quantities and selections for each plot.
//!
//! Each plot has its own "chain":
//!
//! - [`AgeMap`]: candidate millisecond pulsars in the Galactic plane, sized and
//!   coloured by characteristic age;
//! - [`NearbyEnergy`]: spin-down energy flux at Earth of nearby, old pulsars,
//!   split into millisecond and normal pulsars;
//! - [`PpdotDiagram`] and [`GuideCurves`]: every pulsar on the P-Pdot diagram,
//!   sized by spin-down luminosity, with lines of constant age and field.
//!
//! Everything here is recomputed from a [`Dataset`](crate::Dataset) on every
//! call; nothing is cached or mutated in place.

mod age_map;
mod error;
mod nearby;
mod ppdot;

pub use age_map::{AgeMap, AgeMapPoint, LOG_AGE_RANGE};
pub use error::PipelineError;
pub use nearby::{nearby_mask, NearbyEnergy, MSP_FIELD_BINS, NORMAL_FIELD_BINS};
pub use ppdot::{
    GuideCurve, GuideCurves, PpdotDiagram, GUIDE_AGES_GYR, GUIDE_FIELDS, LOG_EDOT_RANGE,
    MSP_SHADE_BOUND, NUM_PERIOD_SAMPLES, PERIOD_RANGE,
};

use ndarray::prelude::*;

use crate::constants::{DEFAULT_SIZE_MAX, DEFAULT_SIZE_MIN};

/// Linearly map `value` from the domain [`value_min`, `value_max`] onto
/// [`smin`, `smax`]. Values outside the domain are extrapolated, not clamped.
pub fn scale_size(
    value: f64,
    value_min: f64,
    value_max: f64,
    smin: f64,
    smax: f64,
) -> Result<f64, PipelineError> {
    if value_max == value_min {
        return Err(PipelineError::DegenerateDomain(value_min));
    }
    Ok((value - value_min) / (value_max - value_min) * (smax - smin) + smin)
}

/// The range of dot sizes used on scatter plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    pub min: f64,
    pub max: f64,
}

impl Default for SizeScale {
    fn default() -> Self {
        SizeScale {
            min: DEFAULT_SIZE_MIN,
            max: DEFAULT_SIZE_MAX,
        }
    }
}

impl SizeScale {
    pub fn scale(&self, value: f64, value_min: f64, value_max: f64) -> Result<f64, PipelineError> {
        scale_size(value, value_min, value_max, self.min, self.max)
    }

    /// [`SizeScale::scale`] every element of `values`.
    pub fn scale_all(
        &self,
        values: ArrayView1<f64>,
        value_min: f64,
        value_max: f64,
    ) -> Result<Array1<f64>, PipelineError> {
        // Validate the domain once, even if there are no values.
        self.scale(value_min, value_min, value_max)?;
        Ok(values.mapv(|v| {
            (v - value_min) / (value_max - value_min) * (self.max - self.min) + self.min
        }))
    }
}

/// The layout of histogram bins: `num_bins` equal-width bins spanning `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLayout {
    pub num_bins: usize,
    pub range: (f64, f64),
}

/// A weighted histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bin edges; there is one more edge than there are bins.
    pub edges: Array1<f64>,
    /// The sum of the weights falling in each bin.
    pub totals: Array1<f64>,
}

impl Histogram {
    /// Bin `values`, adding each value's weight to its bin. The last bin
    /// includes its upper edge; NaNs and values outside the range are ignored.
    pub fn weighted(
        values: ArrayView1<f64>,
        weights: ArrayView1<f64>,
        layout: BinLayout,
    ) -> Result<Histogram, PipelineError> {
        let BinLayout {
            num_bins,
            range: (lo, hi),
        } = layout;
        if num_bins == 0 {
            return Err(PipelineError::NoBins);
        }
        if lo >= hi || !lo.is_finite() || !hi.is_finite() {
            return Err(PipelineError::InvalidRange { lo, hi });
        }
        if values.len() != weights.len() {
            return Err(PipelineError::LengthMismatch {
                values: values.len(),
                weights: weights.len(),
            });
        }

        let edges = Array1::linspace(lo, hi, num_bins + 1);
        let mut totals = Array1::zeros(num_bins);
        for (&v, &w) in values.iter().zip(weights.iter()) {
            if let Some(i) = bin_index(v, &edges) {
                totals[i] += w;
            }
        }

        Ok(Histogram { edges, totals })
    }

    /// The sum of all bin totals.
    pub fn sum(&self) -> f64 {
        self.totals.sum()
    }

    /// Iterate over (lower edge, upper edge, total) for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .into_iter()
            .zip(self.totals.iter())
            .map(|(e, &t)| (e[0], e[1], t))
    }
}

fn bin_index(value: f64, edges: &Array1<f64>) -> Option<usize> {
    let num_bins = edges.len() - 1;
    let lo = edges[0];
    let hi = edges[num_bins];
    if value.is_nan() || value < lo || value > hi {
        return None;
    }
    if value == hi {
        return Some(num_bins - 1);
    }

    let mut i = (((value - lo) / (hi - lo)) * num_bins as f64).floor() as usize;
    i = i.min(num_bins - 1);
    // The floor can be off by one near an edge because of float error.
    if value < edges[i] && i > 0 {
        i -= 1;
    } else if value >= edges[i + 1] && i + 1 < num_bins {
        i += 1;
    }
    Some(i)
}

/// The finite minimum and maximum of some values, if any are finite.
pub(crate) fn finite_range<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
