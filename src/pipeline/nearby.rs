// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spin-down energy flux at Earth of nearby, old pulsars.

use log::debug;
use ndarray::prelude::*;
use ndarray::Zip;

use super::{BinLayout, Histogram, PipelineError};
use crate::{
    constants::{MSP_FIELD_THRESHOLD, NEARBY_DISTANCE_THRESHOLD, OLD_AGE_THRESHOLD},
    physics::{characteristic_age, field_strength, galactic_distance, period_derivative_from_field},
    Dataset,
};

/// Histogram bins of log10(B / G) covering the millisecond pulsars.
pub const MSP_FIELD_BINS: BinLayout = BinLayout {
    num_bins: 6,
    range: (7.0, 10.0),
};

/// Histogram bins of log10(B / G) covering the normal pulsars.
pub const NORMAL_FIELD_BINS: BinLayout = BinLayout {
    num_bins: 8,
    range: (10.0, 14.0),
};

/// Which pulsars are closer than [`NEARBY_DISTANCE_THRESHOLD`] and older than
/// [`OLD_AGE_THRESHOLD`]. Pulsars without a positive period derivative are
/// never selected.
pub fn nearby_mask(dataset: &Dataset) -> Array1<bool> {
    Zip::from(&dataset.p0)
        .and(&dataset.p1)
        .and(&dataset.xx)
        .and(&dataset.yy)
        .map_collect(|&p0, &p1, &xx, &yy| {
            p1 > 0.0
                && galactic_distance(xx, yy) < NEARBY_DISTANCE_THRESHOLD
                && characteristic_age(p0, p1) > OLD_AGE_THRESHOLD
        })
}

/// The nearby, old pulsars. All arrays only contain the selected pulsars.
#[derive(Debug, Clone)]
pub struct NearbyEnergy {
    /// log10 of the surface dipole field \[G\].
    pub log_b: Array1<f64>,
    /// Spin-down luminosity divided by distance squared \[erg/s/kpc^2\].
    pub edot_over_d2: Array1<f64>,
    /// Below the [`MSP_FIELD_THRESHOLD`] constant-field line?
    pub is_msp: Array1<bool>,
    /// Above the [`MSP_FIELD_THRESHOLD`] constant-field line? A pulsar exactly
    /// on the line is neither.
    pub is_normal: Array1<bool>,
    /// Total EDOT/d^2 of the millisecond pulsars.
    pub msp_total: f64,
    /// Total EDOT/d^2 of the normal pulsars.
    pub normal_total: f64,
}

impl NearbyEnergy {
    pub fn new(dataset: &Dataset) -> NearbyEnergy {
        let mask = nearby_mask(dataset);
        let nearby = dataset.select(mask.view());

        let log_b = Zip::from(&nearby.p0)
            .and(&nearby.p1)
            .map_collect(|&p0, &p1| field_strength(p0, p1).log10());
        let edot_over_d2 = Zip::from(&nearby.edot)
            .and(&nearby.xx)
            .and(&nearby.yy)
            .map_collect(|&edot, &xx, &yy| edot / galactic_distance(xx, yy).powi(2));
        let pdot_max = nearby
            .p0
            .mapv(|p0| period_derivative_from_field(p0, MSP_FIELD_THRESHOLD));
        let is_msp = Zip::from(&nearby.p1)
            .and(&pdot_max)
            .map_collect(|&p1, &max| p1 < max);
        let is_normal = Zip::from(&nearby.p1)
            .and(&pdot_max)
            .map_collect(|&p1, &max| p1 > max);

        let total = |group: &Array1<bool>| -> f64 {
            edot_over_d2
                .iter()
                .zip(group.iter())
                .filter(|(_, &g)| g)
                .map(|(&e, _)| e)
                .sum()
        };
        let msp_total = total(&is_msp);
        let normal_total = total(&is_normal);
        debug!(
            "Nearby pulsars: {} of {} selected",
            nearby.len(),
            dataset.len()
        );

        NearbyEnergy {
            log_b,
            edot_over_d2,
            is_msp,
            is_normal,
            msp_total,
            normal_total,
        }
    }

    pub fn len(&self) -> usize {
        self.log_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_b.is_empty()
    }

    /// A histogram of log10(B) over all of the selected pulsars, weighted by
    /// EDOT/d^2.
    pub fn histogram(&self, layout: BinLayout) -> Result<Histogram, PipelineError> {
        Histogram::weighted(self.log_b.view(), self.edot_over_d2.view(), layout)
    }
}
