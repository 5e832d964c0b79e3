// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use super::{InfoPrinter, PsrplotError, Warn};
use crate::{
    constants::{DEFAULT_DISTANCE_FILE, DEFAULT_NEARBY_FILE, DEFAULT_PPDOT_FILE},
    plot::{format_total, plot_distance, plot_nearby, plot_ppdot, PlotStyle},
};

/// The plots psrplot can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub(super) enum PlotKind {
    #[strum(serialize = "P-Pdot diagram")]
    Ppdot,
    #[strum(serialize = "distance plot")]
    Distance,
    #[strum(serialize = "nearby histogram")]
    Nearby,
}

impl PlotKind {
    pub(super) fn default_output(self) -> &'static str {
        match self {
            PlotKind::Ppdot => DEFAULT_PPDOT_FILE,
            PlotKind::Distance => DEFAULT_DISTANCE_FILE,
            PlotKind::Nearby => DEFAULT_NEARBY_FILE,
        }
    }

    /// Draw this plot. `Ok(false)` means the dataset couldn't be loaded and
    /// nothing was written.
    pub(super) fn plot(
        self,
        dataset: &Path,
        output: &Path,
        style: &PlotStyle,
    ) -> Result<bool, PsrplotError> {
        let mut printer = InfoPrinter::new(format!("Drew the {self}").into());
        match self {
            PlotKind::Ppdot => match plot_ppdot(dataset, output, style)? {
                None => return Ok(false),
                Some(diagram) => {
                    printer.push_line(format!("{} pulsars", diagram.len()).into());
                }
            },
            PlotKind::Distance => match plot_distance(dataset, output, style)? {
                None => return Ok(false),
                Some(map) => {
                    let mut block = vec![format!(
                        "{} candidate millisecond pulsars",
                        map.num_selected()
                    )
                    .into()];
                    if let Some((lo, hi)) = map.log_age_range() {
                        block.push(format!("log10 age range [Myr]: {lo:.2} to {hi:.2}").into());
                    }
                    printer.push_block(block);
                }
            },
            PlotKind::Nearby => match plot_nearby(dataset, output, style)? {
                None => return Ok(false),
                Some(nearby) => {
                    printer.push_block(vec![
                        "Total spin-down flux at Earth [erg/s/kpc^2]".into(),
                        format!("msp (millisecond pulsars): {}", format_total(nearby.msp_total))
                            .into(),
                        format!("normal pulsars: {}", format_total(nearby.normal_total)).into(),
                    ]);
                }
            },
        }
        printer.push_line(format!("Written to {}", output.display()).into());
        printer.display();
        Ok(true)
    }
}

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct PlotArgs {
    /// The image file to write. The format (png or svg) is determined by the
    /// extension. Default depends on the plot.
    #[clap(short, long, parse(from_os_str))]
    pub(super) output: Option<PathBuf>,
}

impl PlotArgs {
    pub(super) fn run(
        self,
        kind: PlotKind,
        dataset: &Path,
        style: &PlotStyle,
    ) -> Result<(), PsrplotError> {
        let output = self
            .output
            .unwrap_or_else(|| PathBuf::from(kind.default_output()));
        if kind.plot(dataset, &output, style)? {
            Ok(())
        } else {
            Err(PsrplotError::NoData(dataset.to_path_buf()))
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub(super) struct PlotAllArgs {
    /// The directory to write the plots into. It must already exist.
    #[clap(long, parse(from_os_str), default_value = ".")]
    pub(super) output_dir: PathBuf,
}

impl PlotAllArgs {
    pub(super) fn run(self, dataset: &Path, style: &PlotStyle) -> Result<(), PsrplotError> {
        let mut num_drawn = 0;
        for kind in PlotKind::iter() {
            let output = self.output_dir.join(kind.default_output());
            match kind.plot(dataset, &output, style) {
                Ok(true) => num_drawn += 1,
                Ok(false) => {
                    format!("The {kind} wasn't drawn; the dataset couldn't be loaded").warn()
                }
                Err(e) => {
                    error!("{e}");
                    format!("The {kind} wasn't drawn").warn();
                }
            }
        }

        let num_kinds = PlotKind::iter().count();
        info!("Drew {num_drawn} of {num_kinds} plots");
        if num_drawn == 0 {
            Err(PsrplotError::NothingPlotted(num_kinds))
        } else {
            Ok(())
        }
    }
}
