// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{path::Path, path::PathBuf, time::Duration};

use clap::Parser;
use log::debug;

use super::{InfoPrinter, PsrplotError, Warn};
use crate::catalog::{
    try_fetch_catalog, AtnfWebCatalog, CatalogFileSource, CatalogSource, ATNF_QUERY_URL,
    CATALOG_PARAMS,
};

#[derive(Parser, Debug, Clone)]
pub(super) struct QueryArgs {
    /// The URL of the ATNF catalogue query form.
    #[clap(long, default_value = ATNF_QUERY_URL)]
    pub(super) url: String,

    /// How long to wait for the catalogue service to respond [seconds].
    #[clap(long, default_value = "60")]
    pub(super) timeout: u64,

    /// Rather than talking to the catalogue service, read a saved response
    /// from this file (e.g. one saved from a web browser).
    #[clap(long, parse(from_os_str))]
    pub(super) from_file: Option<PathBuf>,
}

impl QueryArgs {
    fn source(&self) -> Box<dyn CatalogSource> {
        match &self.from_file {
            Some(file) => {
                debug!("Reading the catalogue response from {}", file.display());
                Box::new(CatalogFileSource::new(file.clone()))
            }
            None => Box::new(
                AtnfWebCatalog::new()
                    .with_url(self.url.clone())
                    .with_timeout(Duration::from_secs(self.timeout)),
            ),
        }
    }

    pub(super) fn run(self, dataset: &Path) -> Result<(), PsrplotError> {
        let mut printer = InfoPrinter::new("Catalogue query".into());
        match &self.from_file {
            Some(file) => printer.push_line(format!("From file: {}", file.display()).into()),
            None => printer.push_block(vec![
                format!("URL: {}", self.url).into(),
                format!("Timeout: {} s", self.timeout).into(),
            ]),
        }
        printer.push_line(format!("Parameters: {}", CATALOG_PARAMS.join(" ")).into());
        printer.display();

        let count = try_fetch_catalog(self.source().as_ref(), dataset)?;
        if count == 0 {
            format!(
                "No complete pulsar rows were in the catalogue; {} is empty",
                dataset.display()
            )
            .warn();
        }

        let mut printer = InfoPrinter::new("Catalogue saved".into());
        printer.push_line(format!("Saved {count} objects to {}", dataset.display()).into());
        printer.display();
        Ok(())
    }
}
