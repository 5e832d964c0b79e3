// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `psrplot`
//! subcommands are contained in modules.
//!
//! Only 3 things should be public in this module: `Psrplot`, `Psrplot::run`,
//! and `PsrplotError`.

mod error;
mod plot;
mod printers;
mod query;

pub use error::PsrplotError;
pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::{debug, info};

use crate::{constants::DEFAULT_DATASET_FILE, plot::PlotStyle};

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Query the ATNF pulsar catalogue and plot pulsar populations
Catalogue: https://www.atnf.csiro.au/research/pulsar/psrcat"#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Psrplot {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// The dataset file that catalogue queries are written to and plots are
    /// made from. Default: atnf.txt
    #[clap(short, long, parse(from_os_str))]
    #[clap(global = true)]
    dataset: Option<PathBuf>,

    /// A toml or json file describing how plots should look. Any settings
    /// that aren't in the file keep their defaults.
    #[clap(short, long, parse(from_os_str))]
    #[clap(global = true)]
    style: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[clap(about = "Query the ATNF pulsar catalogue and save pulsar parameters to the dataset file.")]
    Query(query::QueryArgs),

    #[clap(alias = "p-pdot")]
    #[clap(about = "Plot the period vs. period-derivative diagram of every pulsar in the dataset.")]
    Ppdot(plot::PlotArgs),

    #[clap(
        about = "Plot candidate millisecond pulsars in the Galactic plane, coloured by characteristic age."
    )]
    Distance(plot::PlotArgs),

    #[clap(
        about = "Plot histograms of the spin-down energy flux at Earth of nearby, old pulsars, and print the totals."
    )]
    Nearby(plot::PlotArgs),

    #[clap(alias = "all")]
    #[clap(
        about = "Draw every plot. A plot that fails is reported and doesn't stop the others."
    )]
    PlotAll(plot::PlotAllArgs),
}

impl Psrplot {
    pub fn run(self) -> Result<(), PsrplotError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dataset,
            style,
        } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");

        // Print the version of psrplot and its build-time information.
        let sub_command = match &self.command {
            Command::Query(_) => "query",
            Command::Ppdot(_) => "ppdot",
            Command::Distance(_) => "distance",
            Command::Nearby(_) => "nearby",
            Command::PlotAll(_) => "plot-all",
        };
        info!("psrplot {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        let dataset = dataset.unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_FILE));
        debug!("Using dataset file {}", dataset.display());
        let load_style = || -> Result<PlotStyle, PsrplotError> {
            match style {
                Some(file) => Ok(PlotStyle::from_file(file)?),
                None => Ok(PlotStyle::default()),
            }
        };

        let result = match self.command {
            Command::Query(args) => args.run(&dataset),
            Command::Ppdot(args) => load_style()
                .and_then(|style| args.run(plot::PlotKind::Ppdot, &dataset, &style)),
            Command::Distance(args) => load_style()
                .and_then(|style| args.run(plot::PlotKind::Distance, &dataset, &style)),
            Command::Nearby(args) => load_style()
                .and_then(|style| args.run(plot::PlotKind::Nearby, &dataset, &style)),
            Command::PlotAll(args) => load_style().and_then(|style| args.run(&dataset, &style)),
        };
        // Warnings are shown even if something went wrong.
        display_warnings();
        result?;

        info!("psrplot {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()?;

    Ok(())
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
