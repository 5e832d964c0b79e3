// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drawing with plotters.

use std::f64::consts::TAU;
use std::ffi::OsString;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use log::trace;
use plotters::{coord::Shift, prelude::*};

use super::{format_total, ImageFormat, PlotError, PlotStyle};
use crate::{
    constants::SUN_GALACTOCENTRIC_DISTANCE,
    pipeline::{
        AgeMap, GuideCurves, NearbyEnergy, PpdotDiagram, LOG_AGE_RANGE, LOG_EDOT_RANGE,
        MSP_FIELD_BINS, MSP_SHADE_BOUND, NORMAL_FIELD_BINS,
    },
};

/// P-Pdot diagram axis limits.
const PPDOT_X_RANGE: (f64, f64) = (1e-3, 40.0);
const PPDOT_Y_RANGE: (f64, f64) = (1e-22, 1e-9);

/// Galactic-plane axis limits \[kpc\].
const DISTANCE_X_RANGE: (f64, f64) = (-14.0, 0.0);
const DISTANCE_Y_RANGE: (f64, f64) = (-10.0, 10.0);
/// The radius of the circle drawn around the Sun \[kpc\].
const DISTANCE_CIRCLE_RADIUS: f64 = 4.0;

/// Nearby-histogram axis limits.
const NEARBY_X_RANGE: (f64, f64) = (7.0, 14.0);
const NEARBY_Y_RANGE: (f64, f64) = (1e33, 1e38);
/// Where the totals are written on the nearby histogram.
const NEARBY_MSP_LABEL: (f64, f64) = (8.0, 3e37);
const NEARBY_NORMAL_LABEL: (f64, f64) = (12.0, 3e37);
const HISTOGRAM_ALPHA: f64 = 0.6;

/// The fraction of the image width given to the main chart; a colour bar
/// takes the rest.
const CHART_WIDTH_FRACTION: f64 = 0.86;
const NUM_COLOUR_BAR_STEPS: usize = 256;
const NUM_CIRCLE_SAMPLES: usize = 361;

const MARGIN: u32 = 20;
const X_LABEL_AREA: u32 = 70;
const Y_LABEL_AREA: u32 = 130;

fn draw_err<E: Display>(plot: &'static str) -> impl Fn(E) -> PlotError {
    move |e| PlotError::Draw {
        plot,
        err: e.to_string(),
    }
}

/// Tick labels for log axes, e.g. "1e-15".
pub(super) fn log_tick_label(value: &f64) -> String {
    format!("{value:.0e}")
}

/// Where an image is drawn before it's moved over `output`. The extension is
/// kept, as the bitmap backend picks its encoder from it.
pub(super) fn partial_path(output: &Path, format: ImageFormat) -> PathBuf {
    let mut name = output.file_stem().map(OsString::from).unwrap_or_default();
    name.push(format!(".partial.{format}"));
    output.with_file_name(name)
}

/// Move a fully-drawn image over `output`, or remove whatever was drawn if
/// drawing failed.
fn finish_partial(
    partial: &Path,
    output: &Path,
    drawn: Result<(), PlotError>,
) -> Result<(), PlotError> {
    let result = drawn.and_then(|()| {
        std::fs::rename(partial, output).map_err(|err| PlotError::Write {
            file: output.to_path_buf(),
            err,
        })
    });
    if result.is_err() {
        // Clean up partial files on error.
        let _ = std::fs::remove_file(partial);
    }
    result
}

/// Make a drawing area for `output` with the right backend, then hand it to a
/// drawing function and present the result. The backends write out what they
/// have when dropped, so the root is dropped before the image is moved into
/// place.
macro_rules! render {
    ($output:expr, $format:expr, $style:expr, $plot:expr, $draw:ident ( $($arg:expr),* )) => {{
        let size = ($style.width, $style.height);
        let partial = partial_path($output, $format);
        let drawn = (|| -> Result<(), PlotError> {
            match $format {
                ImageFormat::Png => {
                    let root = BitMapBackend::new(&partial, size).into_drawing_area();
                    $draw(&root, $style, $($arg),*)?;
                    root.present().map_err(draw_err($plot))?;
                    Ok(())
                }
                ImageFormat::Svg => {
                    let root = SVGBackend::new(&partial, size).into_drawing_area();
                    $draw(&root, $style, $($arg),*)?;
                    root.present().map_err(draw_err($plot))?;
                    Ok(())
                }
            }
        })();
        finish_partial(&partial, $output, drawn)
    }};
}

pub(super) fn draw_ppdot(
    output: &Path,
    format: ImageFormat,
    style: &PlotStyle,
    diagram: &PpdotDiagram,
    guides: &GuideCurves,
) -> Result<(), PlotError> {
    render!(output, format, style, PPDOT, ppdot(diagram, guides))
}

pub(super) fn draw_distance(
    output: &Path,
    format: ImageFormat,
    style: &PlotStyle,
    map: &AgeMap,
) -> Result<(), PlotError> {
    render!(output, format, style, DISTANCE, distance(map))
}

pub(super) fn draw_nearby(
    output: &Path,
    format: ImageFormat,
    style: &PlotStyle,
    nearby: &NearbyEnergy,
) -> Result<(), PlotError> {
    render!(output, format, style, NEARBY, nearby_histograms(nearby))
}

const PPDOT: &str = "the P-Pdot diagram";
const DISTANCE: &str = "the distance plot";
const NEARBY: &str = "the nearby histogram";

/// Exponent tick labels are long, so they're drawn a bit smaller.
fn tick_font_size(style: &PlotStyle) -> u32 {
    (style.font_size * 4 / 5).max(1)
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

fn inside(value: f64, (lo, hi): (f64, f64)) -> bool {
    value >= lo && value <= hi
}

/// Split the root area into the main chart and a colour bar.
fn split_for_colour_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    style: &PlotStyle,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    let chart_width = (style.width as f64 * CHART_WIDTH_FRACTION).round() as u32;
    root.split_horizontally(chart_width)
}

/// A vertical colour bar for `range`, using the style's colour map.
fn colour_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &PlotStyle,
    range: (f64, f64),
    label: &str,
    plot: &'static str,
) -> Result<(), PlotError> {
    let font = (style.font.as_str(), style.font_size);
    let mut chart = ChartBuilder::on(area)
        .margin_top(MARGIN)
        .margin_bottom(MARGIN + X_LABEL_AREA)
        .margin_right(MARGIN)
        .right_y_label_area_size(Y_LABEL_AREA - 30)
        .build_cartesian_2d(0.0..1.0, range.0..range.1)
        .map_err(draw_err(plot))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc(label)
        .label_style(font)
        .axis_desc_style(font)
        .draw()
        .map_err(draw_err(plot))?;

    let step = (range.1 - range.0) / NUM_COLOUR_BAR_STEPS as f64;
    chart
        .draw_series((0..NUM_COLOUR_BAR_STEPS).map(|i| {
            let frac = i as f64 / (NUM_COLOUR_BAR_STEPS - 1) as f64;
            let (r, g, b) = style.colormap.rgb(frac);
            let y0 = range.0 + step * i as f64;
            Rectangle::new([(0.0, y0), (1.0, y0 + step)], RGBColor(r, g, b).filled())
        }))
        .map_err(draw_err(plot))?;
    Ok(())
}

/// The colour of a scatter point whose value is `value` on a colour scale
/// spanning `range`.
fn scatter_colour(style: &PlotStyle, value: f64, range: (f64, f64)) -> RGBAColor {
    let (r, g, b) = style.colormap.rgb((value - range.0) / (range.1 - range.0));
    RGBColor(r, g, b).mix(style.alpha)
}

fn ppdot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    style: &PlotStyle,
    diagram: &PpdotDiagram,
    guides: &GuideCurves,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(draw_err(PPDOT))?;
    let (chart_area, bar_area) = split_for_colour_bar(root, style);
    let font = (style.font.as_str(), style.font_size);
    let tick_font = (style.font.as_str(), tick_font_size(style));

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(
            (PPDOT_X_RANGE.0..PPDOT_X_RANGE.1).log_scale(),
            (PPDOT_Y_RANGE.0..PPDOT_Y_RANGE.1).log_scale(),
        )
        .map_err(draw_err(PPDOT))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Period [s]")
        .y_desc("Period derivative")
        .x_label_formatter(&log_tick_label)
        .y_label_formatter(&log_tick_label)
        .label_style(tick_font)
        .axis_desc_style(font)
        .draw()
        .map_err(draw_err(PPDOT))?;

    let guide_colour = rgb(style.guide_colour);

    // The millisecond-pulsar region, between the constant-field line and a
    // fixed upper bound, clipped to the chart.
    let top = MSP_SHADE_BOUND.clamp(PPDOT_Y_RANGE.0, PPDOT_Y_RANGE.1);
    let mut region: Vec<(f64, f64)> = guides
        .periods
        .iter()
        .zip(guides.msp_boundary.iter())
        .filter(|&(&p, _)| inside(p, PPDOT_X_RANGE))
        .map(|(&p, &pdot)| (p, pdot.clamp(PPDOT_Y_RANGE.0, top)))
        .collect();
    let ends = region
        .first()
        .zip(region.last())
        .map(|(&(first, _), &(last, _))| (first, last));
    if let Some((first, last)) = ends {
        region.push((last, top));
        region.push((first, top));
        chart
            .draw_series(std::iter::once(Polygon::new(
                region,
                guide_colour.mix(0.2).filled(),
            )))
            .map_err(draw_err(PPDOT))?;
    }

    for curve in guides.ages.iter().chain(guides.fields.iter()) {
        trace!("Drawing guide line for {:e}", curve.value);
        chart
            .draw_series(LineSeries::new(
                guides
                    .periods
                    .iter()
                    .zip(curve.pdot.iter())
                    .map(|(&p, &pdot)| (p, pdot))
                    .filter(|&(p, pdot)| {
                        inside(p, PPDOT_X_RANGE) && inside(pdot, PPDOT_Y_RANGE)
                    }),
                guide_colour.stroke_width(1),
            ))
            .map_err(draw_err(PPDOT))?;
    }

    let points = diagram
        .p0
        .iter()
        .zip(diagram.p1.iter())
        .zip(diagram.log_edot.iter().zip(diagram.sizes.iter()))
        .filter(|&((&p0, &p1), _)| inside(p0, PPDOT_X_RANGE) && inside(p1, PPDOT_Y_RANGE))
        .map(|((&p0, &p1), (&log_edot, &size))| {
            Circle::new(
                (p0, p1),
                style.marker_radius(size),
                scatter_colour(style, log_edot, LOG_EDOT_RANGE).filled(),
            )
        });
    chart.draw_series(points).map_err(draw_err(PPDOT))?;

    colour_bar(&bar_area, style, LOG_EDOT_RANGE, "log Ė", PPDOT)
}

fn distance<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    style: &PlotStyle,
    map: &AgeMap,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(draw_err(DISTANCE))?;
    let (chart_area, bar_area) = split_for_colour_bar(root, style);
    let font = (style.font.as_str(), style.font_size);

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(
            DISTANCE_X_RANGE.0..DISTANCE_X_RANGE.1,
            DISTANCE_Y_RANGE.0..DISTANCE_Y_RANGE.1,
        )
        .map_err(draw_err(DISTANCE))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x [kpc]")
        .y_desc("y [kpc]")
        .label_style(font)
        .axis_desc_style(font)
        .draw()
        .map_err(draw_err(DISTANCE))?;

    let guide_style = rgb(style.guide_colour).stroke_width(1);
    let sun_x = -SUN_GALACTOCENTRIC_DISTANCE;
    chart
        .draw_series(LineSeries::new(
            [(DISTANCE_X_RANGE.0, 0.0), (DISTANCE_X_RANGE.1, 0.0)],
            guide_style,
        ))
        .map_err(draw_err(DISTANCE))?;
    chart
        .draw_series(LineSeries::new(
            [(sun_x, DISTANCE_Y_RANGE.0), (sun_x, DISTANCE_Y_RANGE.1)],
            guide_style,
        ))
        .map_err(draw_err(DISTANCE))?;
    chart
        .draw_series(LineSeries::new(
            (0..NUM_CIRCLE_SAMPLES).map(|i| {
                let theta = TAU * i as f64 / (NUM_CIRCLE_SAMPLES - 1) as f64;
                (
                    sun_x + DISTANCE_CIRCLE_RADIUS * theta.cos(),
                    DISTANCE_CIRCLE_RADIUS * theta.sin(),
                )
            }),
            guide_style,
        ))
        .map_err(draw_err(DISTANCE))?;

    let points = map
        .selected_points()
        .filter(|p| inside(p.x, DISTANCE_X_RANGE) && inside(p.y, DISTANCE_Y_RANGE))
        .map(|p| {
            Circle::new(
                (p.x, p.y),
                style.marker_radius(p.size),
                scatter_colour(style, p.log_age, LOG_AGE_RANGE).filled(),
            )
        });
    chart.draw_series(points).map_err(draw_err(DISTANCE))?;

    colour_bar(&bar_area, style, LOG_AGE_RANGE, "log τ [Myr]", DISTANCE)
}

fn nearby_histograms<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    style: &PlotStyle,
    nearby: &NearbyEnergy,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(draw_err(NEARBY))?;
    let font = (style.font.as_str(), style.font_size);
    let tick_font = (style.font.as_str(), tick_font_size(style));

    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(
            NEARBY_X_RANGE.0..NEARBY_X_RANGE.1,
            (NEARBY_Y_RANGE.0..NEARBY_Y_RANGE.1).log_scale(),
        )
        .map_err(draw_err(NEARBY))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("log B [G]")
        .y_desc("Ė / d² [erg/s/kpc²]")
        .y_label_formatter(&log_tick_label)
        .label_style(tick_font)
        .axis_desc_style(font)
        .draw()
        .map_err(draw_err(NEARBY))?;

    for (layout, colour) in [
        (MSP_FIELD_BINS, rgb(style.msp_colour)),
        (NORMAL_FIELD_BINS, rgb(style.normal_colour)),
    ] {
        let histogram = nearby.histogram(layout)?;
        // Empty bins have nothing to show on a log axis.
        let bars = histogram
            .bins()
            .filter(|&(_, _, total)| total > 0.0)
            .map(|(lo, hi, total)| {
                Rectangle::new(
                    [(lo, NEARBY_Y_RANGE.0), (hi, total.min(NEARBY_Y_RANGE.1))],
                    colour.mix(HISTOGRAM_ALPHA).filled(),
                )
            });
        chart.draw_series(bars).map_err(draw_err(NEARBY))?;
    }

    for (total, position, colour) in [
        (nearby.msp_total, NEARBY_MSP_LABEL, style.msp_colour),
        (nearby.normal_total, NEARBY_NORMAL_LABEL, style.normal_colour),
    ] {
        chart
            .draw_series(std::iter::once(Text::new(
                format_total(total),
                position,
                font.into_font().color(&rgb(colour)),
            )))
            .map_err(draw_err(NEARBY))?;
    }

    Ok(())
}
