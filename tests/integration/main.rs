// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod plot;
mod query;

use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use assert_cmd::{output::OutputError, Command};

/// A saved catalogue response; 8 of its 10 pulsars have complete values.
const ATNF_RESPONSE_FILE: &str = "test_files/atnf_response.html";

fn psrplot() -> Command {
    Command::cargo_bin("psrplot").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Run `psrplot query` against the saved response, writing the dataset into
/// `dir`.
fn make_dataset<P: AsRef<Path>>(dir: P) -> PathBuf {
    let dataset = dir.as_ref().join("atnf.txt");
    let cmd = psrplot()
        .args([
            "query",
            "--from-file",
            ATNF_RESPONSE_FILE,
            "--dataset",
            &format!("{}", dataset.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    dataset
}

#[test]
fn test_help() {
    let cmd = psrplot().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    for sub in ["query", "ppdot", "distance", "nearby", "plot-all"] {
        assert!(stdout.contains(sub), "'{sub}' isn't in the help:\n{stdout}");
    }
}

#[test]
fn test_no_subcommand_fails() {
    let cmd = psrplot().ok();
    assert!(cmd.is_err());
}
