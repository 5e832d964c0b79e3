// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The period vs. period-derivative diagram.

use ndarray::prelude::*;

use super::{PipelineError, SizeScale};
use crate::{
    constants::{GYR, MSP_FIELD_THRESHOLD},
    physics::{period_derivative_from_age, period_derivative_from_field},
    Dataset,
};

/// The domain of log10(EDOT / (erg/s)) mapped onto dot sizes and the colour
/// scale.
pub const LOG_EDOT_RANGE: (f64, f64) = (29.0, 38.0);

/// Ages of the constant-age guide lines \[Gyr\].
pub const GUIDE_AGES_GYR: [f64; 7] = [1e-8, 1e-6, 1e-4, 1e-2, 1.0, 1e2, 1e4];

/// Field strengths of the constant-field guide lines \[G\].
pub const GUIDE_FIELDS: [f64; 7] = [1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14];

/// The guide lines are evaluated over periods 10^a to 10^b seconds.
pub const PERIOD_RANGE: (f64, f64) = (-3.0, 2.0);

/// The number of log-spaced period samples of each guide line.
pub const NUM_PERIOD_SAMPLES: usize = 1000;

/// The shaded millisecond-pulsar region spans between the constant-field line
/// and this period derivative.
pub const MSP_SHADE_BOUND: f64 = 1e-2;

/// Every pulsar in the dataset, ready to be put on the P-Pdot diagram.
#[derive(Debug, Clone)]
pub struct PpdotDiagram {
    pub p0: Array1<f64>,
    pub p1: Array1<f64>,
    /// log10 of the spin-down luminosity \[erg/s\].
    pub log_edot: Array1<f64>,
    /// Dot sizes, scaled from [`LOG_EDOT_RANGE`]. Not clamped.
    pub sizes: Array1<f64>,
}

impl PpdotDiagram {
    pub fn new(dataset: &Dataset, size_scale: &SizeScale) -> Result<PpdotDiagram, PipelineError> {
        let log_edot = dataset.edot.mapv(f64::log10);
        let sizes = size_scale.scale_all(log_edot.view(), LOG_EDOT_RANGE.0, LOG_EDOT_RANGE.1)?;
        Ok(PpdotDiagram {
            p0: dataset.p0.clone(),
            p1: dataset.p1.clone(),
            log_edot,
            sizes,
        })
    }

    pub fn len(&self) -> usize {
        self.p0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p0.is_empty()
    }
}

/// A line of constant age or field strength, evaluated at
/// [`GuideCurves::periods`].
#[derive(Debug, Clone)]
pub struct GuideCurve {
    /// The age \[s\] or field strength \[G\] that is constant along this line.
    pub value: f64,
    pub pdot: Array1<f64>,
}

/// The guide lines drawn over the P-Pdot diagram.
#[derive(Debug, Clone)]
pub struct GuideCurves {
    pub periods: Array1<f64>,
    pub ages: Vec<GuideCurve>,
    pub fields: Vec<GuideCurve>,
    /// The constant-field line bounding the millisecond-pulsar region.
    pub msp_boundary: Array1<f64>,
}

impl GuideCurves {
    pub fn new() -> GuideCurves {
        let periods = Array1::logspace(10.0, PERIOD_RANGE.0, PERIOD_RANGE.1, NUM_PERIOD_SAMPLES);
        let ages = GUIDE_AGES_GYR
            .iter()
            .map(|&age_gyr| {
                let age = age_gyr * GYR;
                GuideCurve {
                    value: age,
                    pdot: periods.mapv(|p| period_derivative_from_age(p, age)),
                }
            })
            .collect();
        let fields = GUIDE_FIELDS
            .iter()
            .map(|&b| GuideCurve {
                value: b,
                pdot: periods.mapv(|p| period_derivative_from_field(p, b)),
            })
            .collect();
        let msp_boundary = periods.mapv(|p| period_derivative_from_field(p, MSP_FIELD_THRESHOLD));

        GuideCurves {
            periods,
            ages,
            fields,
            msp_boundary,
        }
    }
}

impl Default for GuideCurves {
    fn default() -> Self {
        GuideCurves::new()
    }
}
