// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use indoc::indoc;
use tempfile::{tempdir, Builder};

use super::*;

fn style_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_image_format_from_path() {
    assert_eq!(
        ImageFormat::from_path("ATNF_PPDOT.png").unwrap(),
        ImageFormat::Png
    );
    assert_eq!(
        ImageFormat::from_path("plots/nearby.SVG").unwrap(),
        ImageFormat::Svg
    );
    assert!(matches!(
        ImageFormat::from_path("ATNF_PPDOT.pdf"),
        Err(PlotError::UnknownImageFormat(_))
    ));
    assert!(matches!(
        ImageFormat::from_path("no_extension"),
        Err(PlotError::UnknownImageFormat(_))
    ));
    assert_eq!(IMAGE_EXTENSIONS_COMMA_SEPARATED.as_str(), "png, svg");
}

#[test]
fn test_format_total() {
    assert_eq!(format_total(1.1e37), "1.1 × 10^37");
    assert_eq!(format_total(2.04e37), "2.0 × 10^37");
    assert_eq!(format_total(1e33), "1.0 × 10^33");
    // Rounding up carries into the exponent.
    assert_eq!(format_total(9.97e36), "1.0 × 10^37");
    assert_eq!(format_total(0.0), "0");
    assert_eq!(format_total(f64::INFINITY), "inf");
}

#[test]
fn test_colormaps() {
    assert_eq!(Colormap::Jet.rgb(0.0), (0, 0, 128));
    assert_eq!(Colormap::Jet.rgb(0.5), (128, 255, 128));
    assert_eq!(Colormap::Jet.rgb(1.0), (128, 0, 0));
    // Out-of-range values are clamped; NaN is the start of the scale.
    assert_eq!(Colormap::Jet.rgb(2.0), Colormap::Jet.rgb(1.0));
    assert_eq!(Colormap::Jet.rgb(-1.0), Colormap::Jet.rgb(0.0));
    assert_eq!(Colormap::Jet.rgb(f64::NAN), Colormap::Jet.rgb(0.0));

    assert_eq!(Colormap::Hot.rgb(0.0), (0, 0, 0));
    assert_eq!(Colormap::Hot.rgb(1.0), (255, 255, 255));
    assert_eq!(Colormap::Gray.rgb(0.5), (128, 128, 128));
}

#[test]
fn test_default_style() {
    let style = PlotStyle::default();
    assert!(style.validate().is_ok());
    assert_eq!(style.colormap, Colormap::Jet);
    assert_eq!(style.size_scale(), crate::pipeline::SizeScale::default());
    assert_eq!(style.marker_radius(100.0), 7);
    assert_eq!(style.marker_radius(-17.5), 0);
    assert_eq!(style.marker_radius(f64::NAN), 0);
}

#[test]
fn test_style_from_toml() {
    let file = style_file(
        ".toml",
        indoc! {r#"
            width = 800
            height = 600
            colormap = "hot"
            msp_colour = [255, 0, 0]
        "#},
    );
    let style = PlotStyle::from_file(file.path()).unwrap();
    assert_eq!(style.width, 800);
    assert_eq!(style.height, 600);
    assert_eq!(style.colormap, Colormap::Hot);
    assert_eq!(style.msp_colour, [255, 0, 0]);
    // Everything else is the default.
    assert_eq!(style.font, PlotStyle::default().font);
    assert_eq!(style.normal_colour, PlotStyle::default().normal_colour);
}

#[test]
fn test_style_from_json() {
    let file = style_file(".json", r#"{"alpha": 0.5, "colormap": "gray", "size_max": 200.0}"#);
    let style = PlotStyle::from_file(file.path()).unwrap();
    assert_eq!(style.alpha, 0.5);
    assert_eq!(style.colormap, Colormap::Gray);
    assert_eq!(style.size_scale().max, 200.0);
}

#[test]
fn test_style_errors() {
    let file = style_file(".yaml", "width: 800\n");
    assert!(matches!(
        PlotStyle::from_file(file.path()),
        Err(StyleError::UnknownFileType(_))
    ));

    let file = style_file(".toml", "colour_map = \"jet\"\n");
    assert!(matches!(
        PlotStyle::from_file(file.path()),
        Err(StyleError::Toml { .. })
    ));

    let file = style_file(".json", "{\"width\": \"wide\"}");
    assert!(matches!(
        PlotStyle::from_file(file.path()),
        Err(StyleError::Json { .. })
    ));

    let file = style_file(".toml", "alpha = 1.5\n");
    assert!(matches!(
        PlotStyle::from_file(file.path()),
        Err(StyleError::Invalid(_))
    ));

    let file = style_file(".toml", "width = 0\n");
    assert!(matches!(
        PlotStyle::from_file(file.path()),
        Err(StyleError::Invalid(_))
    ));

    let dir = tempdir().unwrap();
    assert!(matches!(
        PlotStyle::from_file(dir.path().join("missing.toml")),
        Err(StyleError::IO(_))
    ));
}

#[test]
fn test_missing_dataset_creates_no_plot() {
    let dir = tempdir().unwrap();
    let dataset = dir.path().join("does_not_exist.txt");
    let style = PlotStyle::default();

    let output = dir.path().join("ppdot.png");
    assert!(plot_ppdot(&dataset, &output, &style).unwrap().is_none());
    assert!(!output.exists());

    let output = dir.path().join("distance.svg");
    assert!(plot_distance(&dataset, &output, &style).unwrap().is_none());
    assert!(!output.exists());

    let output = dir.path().join("nearby.png");
    assert!(plot_nearby(&dataset, &output, &style).unwrap().is_none());
    assert!(!output.exists());
}

#[test]
fn test_malformed_dataset_creates_no_plot() {
    let dir = tempdir().unwrap();
    let dataset = dir.path().join("atnf.txt");
    std::fs::write(&dataset, "# P0 - P1 - EDOT - XX - YY\n0.1 1e-15 oops 1.0 2.0\n").unwrap();

    let output = dir.path().join("nearby.png");
    assert!(plot_nearby(&dataset, &output, &PlotStyle::default())
        .unwrap()
        .is_none());
    assert!(!output.exists());
}

#[test]
fn test_unknown_image_format_creates_no_plot() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("ATNF_PPDOT.pdf");
    let result = plot_ppdot(dir.path().join("atnf.txt"), &output, &PlotStyle::default());
    assert!(matches!(result, Err(PlotError::UnknownImageFormat(_))));
    assert!(!output.exists());
}

#[cfg(feature = "plotting")]
mod drawing {
    use super::*;
    use crate::tests::fixture_dataset;

    /// Nothing but `expected` is left in `dir` besides the dataset.
    fn assert_only_outputs(dir: &Path, expected: &[&str]) {
        let mut names = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n != "atnf.txt")
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, expected);
    }

    fn assert_svg(path: &Path) {
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("<svg"), "{contents}");
    }

    #[test]
    fn test_log_tick_labels() {
        assert_eq!(render::log_tick_label(&1e-3), "1e-3");
        assert_eq!(render::log_tick_label(&1.0000002e-10), "1e-10");
        assert_eq!(render::log_tick_label(&9.99998e37), "1e38");
        assert_eq!(render::log_tick_label(&10.0), "1e1");
    }

    #[test]
    fn test_partial_path_keeps_extension() {
        let partial = render::partial_path(Path::new("plots/ATNF_PPDOT.png"), ImageFormat::Png);
        assert_eq!(partial, Path::new("plots/ATNF_PPDOT.partial.png"));
        assert_eq!(ImageFormat::from_path(&partial).unwrap(), ImageFormat::Png);

        let partial = render::partial_path(Path::new("nearby.svg"), ImageFormat::Svg);
        assert_eq!(partial, Path::new("nearby.partial.svg"));
    }

    #[test]
    fn test_draw_ppdot_svg() {
        let dir = tempdir().unwrap();
        let dataset = fixture_dataset(dir.path());
        let output = dir.path().join("ATNF_PPDOT.svg");
        let diagram = plot_ppdot(&dataset, &output, &PlotStyle::default())
            .unwrap()
            .unwrap();
        assert_eq!(diagram.len(), 8);
        assert_svg(&output);
        assert_only_outputs(dir.path(), &["ATNF_PPDOT.svg"]);
    }

    #[test]
    fn test_draw_distance_svg() {
        let dir = tempdir().unwrap();
        let dataset = fixture_dataset(dir.path());
        let output = dir.path().join("msp_distance.svg");
        let map = plot_distance(&dataset, &output, &PlotStyle::default())
            .unwrap()
            .unwrap();
        assert_eq!(map.num_selected(), 2);
        assert_svg(&output);
        assert_only_outputs(dir.path(), &["msp_distance.svg"]);
    }

    #[test]
    fn test_draw_nearby_svg() {
        let dir = tempdir().unwrap();
        let dataset = fixture_dataset(dir.path());
        let output = dir.path().join("ATNF_NEARBY.svg");
        let nearby = plot_nearby(&dataset, &output, &PlotStyle::default())
            .unwrap()
            .unwrap();
        assert!(nearby.msp_total > 0.0);
        assert!(nearby.normal_total > 0.0);
        assert_svg(&output);
        assert_only_outputs(dir.path(), &["ATNF_NEARBY.svg"]);
    }

    #[test]
    fn test_draw_png() {
        let dir = tempdir().unwrap();
        let dataset = fixture_dataset(dir.path());
        let output = dir.path().join("ATNF_PPDOT.png");
        plot_ppdot(&dataset, &output, &PlotStyle::default())
            .unwrap()
            .unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_only_outputs(dir.path(), &["ATNF_PPDOT.png"]);
    }

    #[test]
    fn test_failed_move_leaves_no_partial_image() {
        let dir = tempdir().unwrap();
        let dataset = fixture_dataset(dir.path());
        // A directory where the image should go can't be replaced.
        let output = dir.path().join("ATNF_NEARBY.png");
        std::fs::create_dir(&output).unwrap();
        let result = plot_nearby(&dataset, &output, &PlotStyle::default());
        assert!(matches!(result, Err(PlotError::Write { .. })));
        assert!(output.is_dir());
        assert_only_outputs(dir.path(), &["ATNF_NEARBY.png"]);
    }
}
