// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Candidate millisecond pulsars in the Galactic plane, by age.

use log::debug;
use ndarray::prelude::*;
use ndarray::Zip;

use super::{finite_range, PipelineError, SizeScale};
use crate::{
    constants::{MSP_FIELD_THRESHOLD, MYR},
    physics::{characteristic_age, is_below_field_line},
    Dataset,
};

/// The domain of log10(age / Myr) mapped onto dot sizes and the colour scale.
pub const LOG_AGE_RANGE: (f64, f64) = (0.0, 4.0);

/// A single dot on the age map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeMapPoint {
    pub x: f64,
    pub y: f64,
    pub log_age: f64,
    pub size: f64,
}

#[derive(Debug, Clone)]
pub struct AgeMap {
    pub xx: Array1<f64>,
    pub yy: Array1<f64>,
    /// log10 of the characteristic age in Myr.
    pub log_age: Array1<f64>,
    /// Dot sizes, scaled from [`LOG_AGE_RANGE`]. Not clamped.
    pub sizes: Array1<f64>,
    /// Which pulsars lie below the constant-field line of
    /// [`MSP_FIELD_THRESHOLD`]. Pulsars without a positive period derivative
    /// are never selected.
    pub selected: Array1<bool>,
}

impl AgeMap {
    pub fn new(dataset: &Dataset, size_scale: &SizeScale) -> Result<AgeMap, PipelineError> {
        let log_age = Zip::from(&dataset.p0)
            .and(&dataset.p1)
            .map_collect(|&p0, &p1| (characteristic_age(p0, p1) / MYR).log10());
        let sizes = size_scale.scale_all(log_age.view(), LOG_AGE_RANGE.0, LOG_AGE_RANGE.1)?;
        let selected = Zip::from(&dataset.p0)
            .and(&dataset.p1)
            .and(&log_age)
            .map_collect(|&p0, &p1, &log_age| {
                p1 > 0.0 && log_age.is_finite() && is_below_field_line(p0, p1, MSP_FIELD_THRESHOLD)
            });

        let map = AgeMap {
            xx: dataset.xx.clone(),
            yy: dataset.yy.clone(),
            log_age,
            sizes,
            selected,
        };
        debug!(
            "Age map: {} of {} pulsars selected",
            map.num_selected(),
            dataset.len()
        );
        Ok(map)
    }

    pub fn num_selected(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// The finite range of log10(age / Myr) over all pulsars.
    pub fn log_age_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.log_age)
    }

    /// Iterate over the selected pulsars only.
    pub fn selected_points(&self) -> impl Iterator<Item = AgeMapPoint> + '_ {
        Zip::from(&self.xx)
            .and(&self.yy)
            .and(&self.log_age)
            .and(&self.sizes)
            .and(&self.selected)
            .map_collect(|&x, &y, &log_age, &size, &selected| {
                selected.then_some(AgeMapPoint {
                    x,
                    y,
                    log_age,
                    size,
                })
            })
            .into_iter()
            .flatten()
    }
}
