// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Times are in seconds, distances in
kiloparsecs and magnetic fields in Gauss unless stated otherwise.
 */

/// The critical magnetic field strength relating period, period derivative and
/// the inferred surface dipole field \[G\].
pub const B_CRIT: f64 = 3.2e19;

/// One Julian year \[s\].
pub const YR: f64 = 365.25 * 86400.0;
/// One thousand years \[s\].
pub const KYR: f64 = 1e3 * YR;
/// One million years \[s\].
pub const MYR: f64 = 1e6 * YR;
/// One billion years \[s\].
pub const GYR: f64 = 1e9 * YR;

/// The assumed distance of the Sun from the Galactic centre \[kpc\]. Catalogue
/// X coordinates are shifted by this amount before computing distances.
pub const SUN_GALACTOCENTRIC_DISTANCE: f64 = 8.0;

/// Pulsars lying below the constant-field line of this strength on the P-Pdot
/// diagram are treated as millisecond (recycled) pulsars \[G\].
pub const MSP_FIELD_THRESHOLD: f64 = 1e10;

/// Pulsars further away than this are not "nearby" \[kpc\].
pub const NEARBY_DISTANCE_THRESHOLD: f64 = 5.0;

/// Pulsars younger than this are not "old" \[s\].
pub const OLD_AGE_THRESHOLD: f64 = 50.0 * KYR;

/// The default smallest dot size on scatter plots.
pub const DEFAULT_SIZE_MIN: f64 = 10.0;
/// The default largest dot size on scatter plots.
pub const DEFAULT_SIZE_MAX: f64 = 120.0;

/// The default dataset file shared by the catalogue query and the plots.
pub const DEFAULT_DATASET_FILE: &str = "atnf.txt";
/// The default output file of the P-Pdot diagram.
pub const DEFAULT_PPDOT_FILE: &str = "ATNF_PPDOT.png";
/// The default output file of the millisecond-pulsar spatial map.
pub const DEFAULT_DISTANCE_FILE: &str = "ATNF_msp_distance.png";
/// The default output file of the nearby-pulsar energy histogram.
pub const DEFAULT_NEARBY_FILE: &str = "ATNF_msp_nearby.png";
