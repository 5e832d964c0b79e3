// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("Can't scale sizes over a degenerate domain; value_min and value_max are both {0}")]
    DegenerateDomain(f64),

    #[error("A histogram needs at least one bin")]
    NoBins,

    #[error("Invalid histogram range [{lo}, {hi}]; the lower edge must be smaller than the upper edge")]
    InvalidRange { lo: f64, hi: f64 },

    #[error("Histogram values ({values}) and weights ({weights}) have different lengths")]
    LengthMismatch { values: usize, weights: usize },
}
