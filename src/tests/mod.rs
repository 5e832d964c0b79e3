// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests across modules and helpful functions.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use tempfile::tempdir;

use crate::{
    catalog::{fetch_catalog, CatalogFileSource},
    pipeline::{AgeMap, NearbyEnergy, PpdotDiagram, SizeScale},
    Dataset,
};

/// A saved catalogue response with 10 pulsars, 8 of which have every value
/// needed for the dataset.
pub(crate) const ATNF_RESPONSE_FILE: &str = "test_files/atnf_response.html";

/// Write the dataset of [`ATNF_RESPONSE_FILE`] into `dir`.
pub(crate) fn fixture_dataset(dir: &Path) -> PathBuf {
    let dataset = dir.join("atnf.txt");
    let count = fetch_catalog(&CatalogFileSource::new(ATNF_RESPONSE_FILE), &dataset);
    assert_eq!(count, 8);
    dataset
}

#[test]
fn test_catalogue_to_pipelines() {
    let dir = tempdir().unwrap();
    let dataset = Dataset::read(fixture_dataset(dir.path())).unwrap();
    assert_eq!(dataset.len(), 8);
    assert_eq!(dataset.num_non_positive_pdot(), 1);
    assert_relative_eq!(dataset.p0[1], 1.5578e-3, max_relative = 1e-5);

    let diagram = PpdotDiagram::new(&dataset, &SizeScale::default()).unwrap();
    assert_eq!(diagram.len(), 8);

    // Only the two recycled pulsars with positive period derivatives fall
    // below the 1e10 G line.
    let map = AgeMap::new(&dataset, &SizeScale::default()).unwrap();
    assert_eq!(map.num_selected(), 2);
    assert!(map.selected_points().all(|p| p.log_age > 3.0));

    // Two nearby old millisecond pulsars and two nearby old normal pulsars.
    let nearby = NearbyEnergy::new(&dataset);
    assert_eq!(nearby.len(), 4);
    assert_eq!(nearby.is_msp.iter().filter(|&&b| b).count(), 2);
    assert_eq!(nearby.is_normal.iter().filter(|&&b| b).count(), 2);
    assert!(nearby.msp_total > nearby.normal_total);
}
