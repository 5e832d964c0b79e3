// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Closed-form pulsar spin-down relations.
//!
//! None of these functions validate their inputs. A non-positive period
//! derivative gives a negative age and a NaN field strength; callers that care
//! must filter such values out themselves (see [`crate::pipeline`]).

#[cfg(test)]
mod tests;

use crate::constants::{B_CRIT, SUN_GALACTOCENTRIC_DISTANCE};

/// The period derivative of a pulsar with the given period \[s\] and surface
/// dipole field \[G\].
#[inline]
pub fn period_derivative_from_field(period: f64, b: f64) -> f64 {
    (b / B_CRIT).powi(2) / period
}

/// The period derivative of a pulsar with the given period \[s\] and
/// characteristic age \[s\].
#[inline]
pub fn period_derivative_from_age(period: f64, age: f64) -> f64 {
    period / (2.0 * age)
}

/// The characteristic age \[s\]. `p1` must be positive for the result to be
/// meaningful.
#[inline]
pub fn characteristic_age(p0: f64, p1: f64) -> f64 {
    p0 / (2.0 * p1)
}

/// The inferred surface dipole field strength \[G\].
#[inline]
pub fn field_strength(p0: f64, p1: f64) -> f64 {
    B_CRIT * (p0 * p1).sqrt()
}

/// The distance from the Sun \[kpc\] of a pulsar at Galactic-plane coordinates
/// (`xx`, `yy`). The catalogue's X axis is recentred on the Sun first.
#[inline]
pub fn galactic_distance(xx: f64, yy: f64) -> f64 {
    (xx + SUN_GALACTOCENTRIC_DISTANCE).hypot(yy)
}

/// Is this pulsar below the constant-field line of strength `b`?
#[inline]
pub fn is_below_field_line(p0: f64, p1: f64, b: f64) -> bool {
    p1 < period_derivative_from_field(p0, b)
}
