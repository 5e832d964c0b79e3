// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Query the ATNF pulsar catalogue and plot pulsar populations.
//!
//! The pieces fit together like so: a [`catalog::CatalogSource`] supplies a
//! table of pulsar parameters, [`catalog::fetch_catalog`] writes the complete
//! rows to a dataset file, [`dataset::Dataset::load`] reads that file back,
//! the [`pipeline`] derives ages, fields and distances, and the [`plot`]
//! module renders the results.

pub mod catalog;
mod cli;
pub mod constants;
pub mod dataset;
pub mod physics;
pub mod pipeline;
pub mod plot;

#[cfg(test)]
mod tests;

pub use cli::{Psrplot, PsrplotError};
pub use dataset::{Dataset, PulsarRecord};
