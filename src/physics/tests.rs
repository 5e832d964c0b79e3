// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::*;
use crate::constants::{MSP_FIELD_THRESHOLD, YR};

#[test]
fn test_pdot_from_field_monotonic() {
    let periods = [1e-3, 3e-3, 0.1, 1.0, 10.0];
    let fields = [1e8, 1e10, 1e12, 1e14];

    for b in fields {
        for w in periods.windows(2) {
            assert!(period_derivative_from_field(w[0], b) > period_derivative_from_field(w[1], b));
        }
    }
    for p in periods {
        for w in fields.windows(2) {
            assert!(period_derivative_from_field(p, w[0]) < period_derivative_from_field(p, w[1]));
        }
    }
}

#[test]
fn test_characteristic_age_is_exact() {
    for (p0, p1) in [(0.089, 1.25e-13), (1.0, 1e-15), (0.003, 1e-20)] {
        assert_eq!(characteristic_age(p0, p1), p0 / (2.0 * p1));
    }

    // The Crab: ~1240 years.
    let age = characteristic_age(0.0334, 4.21e-13);
    assert_abs_diff_eq!(age / YR, 1257.0, epsilon = 1.0);
}

#[test]
fn test_field_and_pdot_are_inverse() {
    for p0 in [1.5e-3, 0.033, 0.7, 8.5] {
        for p1 in [1e-21, 1e-18, 1e-15, 1e-12] {
            let b = field_strength(p0, p1);
            assert_relative_eq!(period_derivative_from_field(p0, b), p1, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_pdot_from_age() {
    // A 1 s pulsar with Pdot 1e-15 has age 5e14 s.
    assert_abs_diff_eq!(period_derivative_from_age(1.0, 5e14), 1e-15);
    assert_relative_eq!(
        period_derivative_from_age(0.5, characteristic_age(0.5, 3e-14)),
        3e-14,
        max_relative = 1e-15
    );
}

#[test]
fn test_scenario_rows() {
    // A recycled pulsar...
    let (p0, p1) = (0.003, 1e-20);
    let b = field_strength(p0, p1);
    assert_relative_eq!(b, 3.2e19 * (0.003_f64 * 1e-20).sqrt(), max_relative = 1e-15);
    assert_relative_eq!(b, 1.7527e8, max_relative = 1e-4);
    assert_relative_eq!(characteristic_age(p0, p1), 1.5e17, max_relative = 1e-15);
    // (1e10 / 3.2e19)^2 / 0.003 ~= 3.255e-17
    let threshold = period_derivative_from_field(p0, MSP_FIELD_THRESHOLD);
    assert_relative_eq!(threshold, 3.2552e-17, max_relative = 1e-4);
    assert!(is_below_field_line(p0, p1, MSP_FIELD_THRESHOLD));

    // ... and a normal one.
    let (p0, p1) = (1.0, 1e-15);
    let threshold = period_derivative_from_field(p0, MSP_FIELD_THRESHOLD);
    assert_relative_eq!(threshold, 9.765625e-20, max_relative = 1e-12);
    assert!(!is_below_field_line(p0, p1, MSP_FIELD_THRESHOLD));
    assert_relative_eq!(field_strength(p0, p1), 1.012e12, max_relative = 1e-3);
}

#[test]
fn test_galactic_distance() {
    assert_abs_diff_eq!(galactic_distance(-8.0, 0.0), 0.0);
    assert_abs_diff_eq!(galactic_distance(-1.0, 1.0), 50.0_f64.sqrt());
    assert_abs_diff_eq!(galactic_distance(-5.0, 4.0), 5.0, epsilon = 1e-12);
}

#[test]
fn test_non_positive_pdot_propagates() {
    assert!(characteristic_age(1.0, -1e-15) < 0.0);
    assert!(field_strength(1.0, -1e-15).is_nan());
    assert!(characteristic_age(1.0, 0.0).is_infinite());
}
