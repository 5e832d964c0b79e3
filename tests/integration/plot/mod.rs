// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, make_dataset, psrplot};

#[test]
fn test_plot_without_dataset() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ppdot.png");
    let cmd = psrplot()
        .args([
            "ppdot",
            "--dataset",
            &format!("{}", dir.path().join("missing.txt").display()),
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("psrplot query"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_plot_unknown_image_format() {
    let dir = TempDir::new().unwrap();
    let dataset = make_dataset(dir.path());
    let output = dir.path().join("nearby.pdf");
    let cmd = psrplot()
        .args([
            "nearby",
            "--dataset",
            &format!("{}", dataset.display()),
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("png, svg"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_plot_bad_style_file() {
    let dir = TempDir::new().unwrap();
    let dataset = make_dataset(dir.path());
    let style = dir.path().join("style.toml");
    std::fs::write(&style, "alpha = 2.0\n").unwrap();
    let output = dir.path().join("ppdot.svg");
    let cmd = psrplot()
        .args([
            "ppdot",
            "--dataset",
            &format!("{}", dataset.display()),
            "--style",
            &format!("{}", style.display()),
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("alpha"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_plot_all_without_dataset() {
    let dir = TempDir::new().unwrap();
    let cmd = psrplot()
        .args([
            "plot-all",
            "--dataset",
            &format!("{}", dir.path().join("missing.txt").display()),
            "--output-dir",
            &format!("{}", dir.path().display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("None of the 3 plots"), "{stderr}");
    assert!(stdout.contains("wasn't drawn"), "{stdout}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
